//! The demonstration reports.
//!
//! Each report owns its collection, its pipeline, the shape of its rows, and
//! how those rows read as text.

pub mod comments;
pub mod movies;

use mongodb::bson::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pipeline::{self, AggregateStore, Pipeline, ResultStream};

pub use comments::{CommentLength, UserComment};
pub use movies::{GenreCount, ImdbBlock, RatedMovie, RatingSummary};

pub const MOVIES: &str = "movies";
pub const COMMENTS: &str = "comments";

pub const DEFAULT_COMMENTER: &str = "Yara Greyjoy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Report {
    TopRated,
    Genres,
    Comments,
    Ratings,
    CommentLengths,
}

/// Knobs for reports that take parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub commenter: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            commenter: DEFAULT_COMMENTER.to_string(),
        }
    }
}

impl Report {
    pub const ALL: [Report; 5] = [
        Report::TopRated,
        Report::Genres,
        Report::Comments,
        Report::Ratings,
        Report::CommentLengths,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Report::TopRated => "top-rated",
            Report::Genres => "genres",
            Report::Comments => "comments",
            Report::Ratings => "ratings",
            Report::CommentLengths => "comment-lengths",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Report::TopRated => "🎬 Top 5 Highest-Rated Movies (2010+):",
            Report::Genres => "🎭 Genre Popularity Ranking:",
            Report::Comments => "💬 User Comments with Movie Titles:",
            Report::Ratings => "📊 IMDb Ratings Summary:",
            Report::CommentLengths => "📅 Average Comment Length by Year:",
        }
    }

    pub fn collection(&self) -> &'static str {
        match self {
            Report::TopRated | Report::Genres | Report::Ratings => MOVIES,
            Report::Comments | Report::CommentLengths => COMMENTS,
        }
    }

    pub fn pipeline(&self, options: &ReportOptions) -> Pipeline {
        match self {
            Report::TopRated => movies::top_rated_pipeline(),
            Report::Genres => movies::genre_ranking_pipeline(),
            Report::Comments => comments::user_comments_pipeline(&options.commenter),
            Report::Ratings => movies::rating_summary_pipeline(),
            Report::CommentLengths => comments::comment_length_pipeline(),
        }
    }

    pub fn from_id(id: &str) -> Result<Report> {
        let wanted = id.trim();
        Report::ALL
            .into_iter()
            .find(|report| report.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known = Report::ALL.map(|r| r.id()).join(", ");
                Error::validation_invalid_argument(
                    "report",
                    format!("Unknown report '{}'", wanted),
                    Some(wanted.to_string()),
                    Some(vec![
                        format!("Available reports: {}", known),
                        "List reports with: mflix list".to_string(),
                    ]),
                )
            })
    }

    /// Run the report's pipeline and decode its rows.
    pub fn run<S>(&self, store: &S, options: &ReportOptions) -> Result<ReportOutput>
    where
        S: AggregateStore + ?Sized,
    {
        let collection = self.collection();
        let pipeline = self.pipeline(options);

        let rows = match self {
            Report::TopRated => {
                ReportRows::TopRated(decode_all(pipeline::run(store, collection, &pipeline)?)?)
            }
            Report::Genres => {
                ReportRows::Genres(decode_all(pipeline::run(store, collection, &pipeline)?)?)
            }
            Report::Comments => {
                ReportRows::Comments(decode_all(pipeline::run(store, collection, &pipeline)?)?)
            }
            Report::Ratings => {
                let doc = pipeline::run_single(store, collection, &pipeline)?;
                ReportRows::Ratings(decode(doc, collection)?)
            }
            Report::CommentLengths => {
                let mut rows: Vec<CommentLength> =
                    decode_all(pipeline::run(store, collection, &pipeline)?)?;
                rows.sort_by_key(|row| row.year);
                ReportRows::CommentLengths(rows)
            }
        };

        Ok(ReportOutput {
            report: *self,
            heading: self.heading().to_string(),
            rows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    TopRated(Vec<RatedMovie>),
    Genres(Vec<GenreCount>),
    Comments(Vec<UserComment>),
    Ratings(RatingSummary),
    CommentLengths(Vec<CommentLength>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOutput {
    pub report: Report,
    pub heading: String,
    pub rows: ReportRows,
}

impl ReportOutput {
    pub fn row_count(&self) -> usize {
        match &self.rows {
            ReportRows::TopRated(rows) => rows.len(),
            ReportRows::Genres(rows) => rows.len(),
            ReportRows::Comments(rows) => rows.len(),
            ReportRows::Ratings(_) => 1,
            ReportRows::CommentLengths(rows) => rows.len(),
        }
    }

    /// Heading followed by one or more lines per row.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.heading.clone()];
        match &self.rows {
            ReportRows::TopRated(rows) => lines.extend(rows.iter().map(movies::render_rated)),
            ReportRows::Genres(rows) => lines.extend(rows.iter().map(movies::render_genre)),
            ReportRows::Comments(rows) => {
                lines.extend(rows.iter().flat_map(comments::render_comment))
            }
            ReportRows::Ratings(summary) => lines.extend(movies::render_summary(summary)),
            ReportRows::CommentLengths(rows) => {
                lines.extend(rows.iter().map(comments::render_length))
            }
        }
        lines
    }

    pub fn render_text(&self) -> String {
        self.lines().join("\n")
    }
}

fn decode<T: DeserializeOwned>(doc: Document, collection: &str) -> Result<T> {
    mongodb::bson::from_document(doc).map_err(|e| {
        Error::store_query_failed(
            format!("unexpected result shape: {}", e),
            Some(collection.to_string()),
        )
    })
}

fn decode_all<T: DeserializeOwned>(stream: ResultStream<'_>) -> Result<Vec<T>> {
    let collection = stream.collection().to_string();
    stream
        .map(|item| item.and_then(|doc| decode(doc, &collection)))
        .collect()
}

/// Whole numbers keep one decimal place (`9.0`); everything else uses the
/// shortest round-trip form.
pub(crate) fn display_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn ids_round_trip_through_from_id() {
        for report in Report::ALL {
            assert_eq!(Report::from_id(report.id()).unwrap(), report);
        }
    }

    #[test]
    fn from_id_is_case_insensitive() {
        assert_eq!(Report::from_id(" Top-Rated ").unwrap(), Report::TopRated);
    }

    #[test]
    fn from_id_unknown_lists_available_reports() {
        let err = Report::from_id("bogus").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
        assert!(err.hints[0].message.contains("comment-lengths"));
    }

    #[test]
    fn collections_match_reports() {
        assert_eq!(Report::TopRated.collection(), MOVIES);
        assert_eq!(Report::Genres.collection(), MOVIES);
        assert_eq!(Report::Ratings.collection(), MOVIES);
        assert_eq!(Report::Comments.collection(), COMMENTS);
        assert_eq!(Report::CommentLengths.collection(), COMMENTS);
    }

    #[test]
    fn display_float_keeps_one_decimal_for_whole_numbers() {
        assert_eq!(display_float(9.0), "9.0");
        assert_eq!(display_float(9.6), "9.6");
        assert_eq!(display_float(6.75), "6.75");
    }

    #[test]
    fn report_serializes_as_kebab_id() {
        let json = serde_json::to_value(Report::CommentLengths).unwrap();
        assert_eq!(json, "comment-lengths");
    }
}
