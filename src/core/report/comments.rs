//! Reports over the `comments` collection.

use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use super::MOVIES;
use crate::pipeline::Pipeline;

pub const COMMENT_LIMIT: i64 = 3;
pub const YEAR_BUCKET_LIMIT: i64 = 5;
pub const COMMENT_PREVIEW_CHARS: usize = 50;

const UNKNOWN_TITLE: &str = "(unknown)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserComment {
    pub user: String,
    pub comment: String,
    /// Absent when the comment's movie has no match in `movies`.
    #[serde(default)]
    pub movie_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentLength {
    /// `None` for comments without a usable date.
    #[serde(rename(deserialize = "_id"), default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub avg_length: Option<f64>,
}

/// Comments by one user, joined with the title of the movie they discuss.
pub fn user_comments_pipeline(commenter: &str) -> Pipeline {
    Pipeline::new()
        .stage(doc! { "$match": { "name": commenter } })
        .stage(doc! {
            "$lookup": {
                "from": MOVIES,
                "localField": "movie_id",
                "foreignField": "_id",
                "as": "movie_info",
            }
        })
        .stage(doc! {
            "$project": {
                "user": "$name",
                "comment": "$text",
                "movie_title": { "$arrayElemAt": ["$movie_info.title", 0] },
            }
        })
        .stage(doc! { "$limit": COMMENT_LIMIT })
}

/// Average comment length bucketed by the year it was posted.
pub fn comment_length_pipeline() -> Pipeline {
    Pipeline::new()
        .stage(doc! {
            "$project": {
                "year": { "$year": "$date" },
                "text_length": { "$strLenCP": "$text" },
            }
        })
        .stage(doc! {
            "$group": {
                "_id": "$year",
                "avg_length": { "$avg": "$text_length" },
            }
        })
        .stage(doc! { "$limit": YEAR_BUCKET_LIMIT })
}

/// First `max` characters of `text`. Counts chars, never splits one.
pub fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub fn render_comment(comment: &UserComment) -> Vec<String> {
    vec![
        format!("- User: {}", comment.user),
        format!(
            "  Movie: {}",
            comment.movie_title.as_deref().unwrap_or(UNKNOWN_TITLE)
        ),
        format!(
            "  Comment: '{}...'",
            preview(&comment.comment, COMMENT_PREVIEW_CHARS)
        ),
    ]
}

pub fn render_length(bucket: &CommentLength) -> String {
    let year = bucket
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "undated".to_string());
    match bucket.avg_length {
        Some(avg) => format!("- {}: {} characters", year, avg.trunc() as i64),
        None => format!("- {}: no text", year),
    }
}
