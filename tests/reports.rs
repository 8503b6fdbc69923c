mod common;

use common::FakeStore;
use mflix::report::{Report, ReportOptions, ReportRows};
use mflix::ErrorCode;
use mongodb::bson::doc;

#[test]
fn top_rated_renders_one_line_per_movie() {
    let store = FakeStore::new().with(
        "movies",
        vec![
            doc! { "title": "A Brave Heart: The Lizzie Velasquez Story", "year": 2015, "imdb": { "rating": 9.4 } },
            doc! { "title": "The Real Miyagi", "year": 2015, "imdb": { "rating": 9.3 } },
            doc! { "title": "Human Planet", "year": 2011, "imdb": { "rating": 9.2 } },
        ],
    );

    let output = Report::TopRated
        .run(&store, &ReportOptions::default())
        .unwrap();

    assert_eq!(
        output.render_text(),
        "🎬 Top 5 Highest-Rated Movies (2010+):\n\
         - A Brave Heart: The Lizzie Velasquez Story (2015): IMDb 9.4\n\
         - The Real Miyagi (2015): IMDb 9.3\n\
         - Human Planet (2011): IMDb 9.2"
    );
    assert_eq!(store.submissions()[0].collection, "movies");
}

#[test]
fn top_rated_decodes_nested_rating_into_typed_row() {
    let store = FakeStore::new().with(
        "movies",
        vec![doc! { "title": "A", "year": 2015, "imdb": { "rating": 9.4 } }],
    );

    let output = Report::TopRated
        .run(&store, &ReportOptions::default())
        .unwrap();

    match &output.rows {
        ReportRows::TopRated(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].title, "A");
            assert_eq!(rows[0].year, 2015);
            assert_eq!(rows[0].imdb.rating, 9.4);
        }
        other => panic!("unexpected rows: {:?}", other),
    }
}

#[test]
fn genres_render_counts() {
    let store = FakeStore::new().with(
        "movies",
        vec![
            doc! { "_id": "Drama", "total_movies": 12385 },
            doc! { "_id": "Comedy", "total_movies": 6532 },
        ],
    );

    let output = Report::Genres.run(&store, &ReportOptions::default()).unwrap();

    assert_eq!(
        output.lines(),
        vec![
            "🎭 Genre Popularity Ranking:",
            "- Drama: 12385 movies",
            "- Comedy: 6532 movies",
        ]
    );
}

#[test]
fn comments_report_uses_configured_commenter() {
    let store = FakeStore::new().with(
        "comments",
        vec![doc! {
            "_id": 1,
            "user": "Zaki Ameer",
            "comment": "Short.",
            "movie_title": "The Wizard of Oz",
        }],
    );
    let options = ReportOptions {
        commenter: "Zaki Ameer".to_string(),
    };

    let output = Report::Comments.run(&store, &options).unwrap();

    let submitted = &store.submissions()[0];
    assert_eq!(submitted.collection, "comments");
    assert_eq!(
        submitted.stages[0]
            .get_document("$match")
            .unwrap()
            .get_str("name")
            .unwrap(),
        "Zaki Ameer"
    );
    assert_eq!(
        output.lines(),
        vec![
            "💬 User Comments with Movie Titles:",
            "- User: Zaki Ameer",
            "  Movie: The Wizard of Oz",
            "  Comment: 'Short....'",
        ]
    );
}

#[test]
fn ratings_summary_renders_two_lines() {
    let store = FakeStore::new().with(
        "movies",
        vec![doc! { "avg_rating": 6.6636, "max_rating": 9.6 }],
    );

    let output = Report::Ratings.run(&store, &ReportOptions::default()).unwrap();

    assert_eq!(output.row_count(), 1);
    assert_eq!(
        output.lines(),
        vec![
            "📊 IMDb Ratings Summary:",
            "- Average Rating: 6.7",
            "- Highest Rating: 9.6",
        ]
    );
}

#[test]
fn ratings_summary_on_empty_collection_is_empty_result() {
    let store = FakeStore::new();

    let err = Report::Ratings
        .run(&store, &ReportOptions::default())
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::StoreEmptyResult);
}

#[test]
fn comment_lengths_are_sorted_by_year_client_side() {
    let store = FakeStore::new().with(
        "comments",
        vec![
            doc! { "_id": 2010, "avg_length": 154.3 },
            doc! { "_id": 1972, "avg_length": 152.9 },
            doc! { "_id": 1984, "avg_length": 151.0 },
        ],
    );

    let output = Report::CommentLengths
        .run(&store, &ReportOptions::default())
        .unwrap();

    assert_eq!(
        output.lines(),
        vec![
            "📅 Average Comment Length by Year:",
            "- 1972: 152 characters",
            "- 1984: 151 characters",
            "- 2010: 154 characters",
        ]
    );
}

#[test]
fn unexpected_row_shape_is_a_query_error() {
    let store = FakeStore::new().with("movies", vec![doc! { "_id": "Drama" }]);

    let err = Report::Genres
        .run(&store, &ReportOptions::default())
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::StoreQueryFailed);
    assert_eq!(err.details["collection"], "movies");
}

#[test]
fn report_output_serializes_rows_for_json_mode() {
    let store = FakeStore::new().with(
        "movies",
        vec![doc! { "_id": "Drama", "total_movies": 3 }],
    );

    let output = Report::Genres.run(&store, &ReportOptions::default()).unwrap();
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["report"], "genres");
    assert_eq!(json["rows"][0]["genre"], "Drama");
    assert_eq!(json["rows"][0]["total_movies"], 3);
}
