//! Reports over the `movies` collection.

use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use super::display_float;
use crate::pipeline::Pipeline;

pub const TOP_RATED_SINCE: i32 = 2010;
pub const TOP_RATED_LIMIT: i64 = 5;
pub const GENRE_LIMIT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImdbBlock {
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedMovie {
    pub title: String,
    pub year: i64,
    pub imdb: ImdbBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreCount {
    #[serde(rename(deserialize = "_id"))]
    pub genre: String,
    pub total_movies: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub avg_rating: f64,
    pub max_rating: f64,
}

/// Highest-rated movies released since 2010, best first.
pub fn top_rated_pipeline() -> Pipeline {
    Pipeline::new()
        .stage(doc! {
            "$match": {
                "year": { "$gte": TOP_RATED_SINCE },
                "imdb.rating": { "$type": "number" },
            }
        })
        .stage(doc! { "$sort": { "imdb.rating": -1 } })
        .stage(doc! { "$limit": TOP_RATED_LIMIT })
}

/// Movie count per genre, most common first.
pub fn genre_ranking_pipeline() -> Pipeline {
    Pipeline::new()
        .stage(doc! { "$unwind": "$genres" })
        .stage(doc! {
            "$group": {
                "_id": "$genres",
                "total_movies": { "$sum": 1 },
            }
        })
        .stage(doc! { "$sort": { "total_movies": -1 } })
        .stage(doc! { "$limit": GENRE_LIMIT })
}

/// Average and maximum IMDb rating across every rated movie.
pub fn rating_summary_pipeline() -> Pipeline {
    Pipeline::new()
        .stage(doc! { "$match": { "imdb.rating": { "$type": "number" } } })
        .stage(doc! {
            "$group": {
                "_id": null,
                "avg_rating": { "$avg": "$imdb.rating" },
                "max_rating": { "$max": "$imdb.rating" },
            }
        })
        .stage(doc! { "$project": { "_id": 0 } })
}

pub fn render_rated(movie: &RatedMovie) -> String {
    format!(
        "- {} ({}): IMDb {}",
        movie.title,
        movie.year,
        display_float(movie.imdb.rating)
    )
}

pub fn render_genre(genre: &GenreCount) -> String {
    format!("- {}: {} movies", genre.genre, genre.total_movies)
}

pub fn render_summary(summary: &RatingSummary) -> Vec<String> {
    vec![
        format!("- Average Rating: {:.1}", summary.avg_rating),
        format!("- Highest Rating: {}", display_float(summary.max_rating)),
    ]
}
