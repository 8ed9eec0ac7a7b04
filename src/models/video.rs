use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, VideoName};
use crate::domain::video::{NewVideo as DomainNewVideo, Video as DomainVideo};

/// Diesel model representing the `vod_list` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vod_list)]
#[diesel(primary_key(vod_id))]
pub struct Video {
    pub vod_id: i32,
    pub vod_name: String,
    pub type_id: i32,
    pub type_name: String,
    pub vod_en: Option<String>,
    pub vod_time: Option<String>,
    pub vod_remarks: Option<String>,
    pub vod_play_from: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Video`]; a replace resets both timestamps.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::vod_list)]
pub struct NewVideo {
    pub vod_id: i32,
    pub vod_name: String,
    pub type_id: i32,
    pub type_name: String,
    pub vod_en: Option<String>,
    pub vod_time: Option<String>,
    pub vod_remarks: Option<String>,
    pub vod_play_from: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Video> for DomainVideo {
    type Error = TypeConstraintError;

    fn try_from(video: Video) -> Result<Self, Self::Error> {
        Ok(Self {
            vod_id: video.vod_id.try_into()?,
            vod_name: VideoName::new(video.vod_name)?,
            type_id: video.type_id.try_into()?,
            type_name: video.type_name,
            vod_en: video.vod_en,
            vod_time: video.vod_time,
            vod_remarks: video.vod_remarks,
            vod_play_from: video.vod_play_from,
            created_at: video.created_at,
            updated_at: video.updated_at,
        })
    }
}

impl NewVideo {
    /// Build the row for `video`, stamped with `now`.
    pub fn from_domain(video: &DomainNewVideo, now: NaiveDateTime) -> Self {
        Self {
            vod_id: video.vod_id.get(),
            vod_name: video.vod_name.as_str().to_string(),
            type_id: video.type_id.get(),
            type_name: video.type_name.clone(),
            vod_en: video.vod_en.clone(),
            vod_time: Some(video.vod_time.clone()),
            vod_remarks: video.vod_remarks.clone(),
            vod_play_from: video.vod_play_from.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}
