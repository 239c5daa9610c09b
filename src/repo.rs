use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use crate::error::BotError;

#[derive(Clone)]
pub struct MovieRepo {
    pool: PgPool,
}

impl MovieRepo {
    pub async fn connect(database_url: &str) -> Result<Self, BotError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// All movies, in the store's (stable) iteration order.
    pub async fn fetch_movies(&self) -> Result<Vec<Movie>, BotError> {
        let rows: Vec<MovieRow> = sqlx::query_as(
            r#"SELECT movie_id, title, genres, overview, vote_average, "cast" FROM movies_full"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }
}

/* ====== Rows and records ====== */

#[derive(FromRow)]
struct MovieRow {
    movie_id: i32,
    title: String,
    genres: Option<String>,
    overview: Option<String>,
    vote_average: Option<f64>,
    cast: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genres: Vec<String>,
    pub overview: String,
    pub vote_average: f64,
    pub cast: Vec<String>,
}

impl Movie {
    /// Comma-joined genre list; empty string when there are none.
    pub fn genre_label(&self) -> String {
        self.genres.join(", ")
    }
}

impl From<MovieRow> for Movie {
    fn from(r: MovieRow) -> Self {
        let cast = match decode_cast(r.cast.as_deref()) {
            Ok(cast) => cast,
            Err(e) => {
                warn!("movie {}: {e}, substituting empty cast", r.movie_id);
                Vec::new()
            }
        };
        Self {
            id: r.movie_id,
            title: r.title,
            genres: split_genres(r.genres.as_deref()),
            overview: r.overview.unwrap_or_default(),
            vote_average: r.vote_average.unwrap_or(0.0),
            cast,
        }
    }
}

fn split_genres(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The cast column holds a JSON-serialized list of names; NULL and empty
/// decode to an empty list.
fn decode_cast(raw: Option<&str>) -> Result<Vec<String>, BotError> {
    match raw {
        Some(s) if !s.trim().is_empty() => Ok(serde_json::from_str(s)?),
        _ => Ok(Vec::new()),
    }
}
