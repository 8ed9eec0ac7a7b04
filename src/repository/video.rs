use chrono::NaiveDateTime;
use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::domain::types::VideoId;
use crate::domain::video::{CategoryVideoCount, Video};
use crate::models::video::Video as DbVideo;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, VideoListQuery, VideoReader};

/// Escape `LIKE` wildcards so `needle` matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

impl VideoReader for DieselRepository {
    fn list_videos(&self, query: VideoListQuery) -> RepositoryResult<(usize, Vec<Video>)> {
        use crate::schema::vod_list;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = vod_list::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(type_id) = query.type_id {
                items = items.filter(vod_list::type_id.eq(type_id.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order((vod_list::vod_time.desc(), vod_list::vod_id.desc()))
            .load::<DbVideo>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Video>, _>>()?;

        Ok((total, items))
    }

    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        use crate::schema::vod_list;

        let mut conn = self.conn()?;

        let video = vod_list::table
            .filter(vod_list::vod_id.eq(id.get()))
            .first::<DbVideo>(&mut conn)
            .optional()?;

        let video = video.map(TryInto::try_into).transpose()?;
        Ok(video)
    }

    fn search_videos(&self, needle: &str, limit: i64) -> RepositoryResult<Vec<Video>> {
        use crate::schema::vod_list;

        let mut conn = self.conn()?;
        let pattern = like_pattern(needle);

        let name_matches = vod_list::vod_name.like(pattern.clone()).escape('\\');
        let english_matches = vod_list::vod_en
            .assume_not_null()
            .like(pattern)
            .escape('\\');

        let items = vod_list::table
            .filter(name_matches.or(english_matches))
            .order((vod_list::vod_time.desc(), vod_list::vod_id.desc()))
            .limit(limit)
            .load::<DbVideo>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Video>, _>>()?;

        Ok(items)
    }

    fn count_videos(&self) -> RepositoryResult<usize> {
        use crate::schema::vod_list;

        let mut conn = self.conn()?;
        let total = vod_list::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }

    fn count_videos_since(&self, since: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::vod_list;

        let mut conn = self.conn()?;
        let recent = vod_list::table
            .filter(vod_list::created_at.ge(since))
            .count()
            .get_result::<i64>(&mut conn)?;
        Ok(recent as usize)
    }

    fn top_categories(&self, limit: i64) -> RepositoryResult<Vec<CategoryVideoCount>> {
        use crate::schema::vod_list;

        let mut conn = self.conn()?;

        let rows = vod_list::table
            .group_by(vod_list::type_name)
            .select((vod_list::type_name, count_star()))
            .order_by((count_star().desc(), vod_list::type_name.asc()))
            .limit(limit)
            .load::<(String, i64)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(type_name, count)| CategoryVideoCount { type_name, count })
            .collect())
    }
}
