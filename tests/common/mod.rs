//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_vod::db::{DbPool, establish_connection_pool, run_migrations};
use pushkind_vod::schema::{vod_class, vod_list};
use pushkind_vod::upstream::{UpstreamError, UpstreamPage, VodSource, parse_page};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Insert a video row directly, bypassing the ingestion path.
    pub fn insert_video(&self, id: i32, name: &str, type_name: &str, vod_time: &str) {
        self.insert_video_at(id, name, type_name, vod_time, chrono::Utc::now().naive_utc());
    }

    pub fn insert_video_at(
        &self,
        id: i32,
        name: &str,
        type_name: &str,
        vod_time: &str,
        created_at: NaiveDateTime,
    ) {
        let mut conn = self.pool.get().expect("should acquire DB connection");
        diesel::insert_into(vod_list::table)
            .values((
                vod_list::vod_id.eq(id),
                vod_list::vod_name.eq(name),
                vod_list::type_id.eq(6),
                vod_list::type_name.eq(type_name),
                vod_list::vod_en.eq(name.to_lowercase()),
                vod_list::vod_time.eq(vod_time),
                vod_list::created_at.eq(created_at),
                vod_list::updated_at.eq(created_at),
            ))
            .execute(&mut conn)
            .expect("should insert video");
    }

    pub fn insert_category(&self, id: i32, pid: i32, name: &str) {
        let mut conn = self.pool.get().expect("should acquire DB connection");
        diesel::insert_into(vod_class::table)
            .values((
                vod_class::type_id.eq(id),
                vod_class::type_pid.eq(pid),
                vod_class::type_name.eq(name),
            ))
            .execute(&mut conn)
            .expect("should insert category");
    }

    pub fn video_count(&self) -> i64 {
        let mut conn = self.pool.get().expect("should acquire DB connection");
        vod_list::table
            .count()
            .get_result(&mut conn)
            .expect("should count videos")
    }
}

/// Upstream double answering from a fixed list of page bodies.
///
/// A `None` entry answers like an upstream returning HTTP 500; pages past the
/// end of the list come back empty.
pub struct StaticSource {
    pages: Vec<Option<Value>>,
}

impl StaticSource {
    pub fn new(pages: Vec<Option<Value>>) -> Self {
        Self { pages }
    }
}

impl VodSource for StaticSource {
    async fn fetch_page(&self, page: u32) -> Result<UpstreamPage, UpstreamError> {
        match self.pages.get(page as usize - 1) {
            Some(Some(body)) => parse_page(body.to_string().as_bytes()),
            Some(None) => Err(UpstreamError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            None => parse_page(br#"{"code": 1, "list": []}"#),
        }
    }
}

pub fn video_record(id: i32, name: &str, vod_time: &str) -> Value {
    json!({
        "vod_id": id,
        "vod_name": name,
        "type_id": 6,
        "type_name": "Action",
        "vod_en": name.to_lowercase(),
        "vod_time": vod_time,
        "vod_remarks": "HD",
        "vod_play_from": "m3u8"
    })
}

pub fn listing(list: Vec<Value>, pagecount: i64) -> Value {
    json!({"code": 1, "page": 1, "pagecount": pagecount, "list": list})
}
