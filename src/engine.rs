use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::corpus;
use crate::error::BotError;
use crate::matcher::{MatchIndex, MatcherConfig};
use crate::repo::{Movie, MovieRepo};

/// Queries shorter than this skip the title shortcut, so near-empty input
/// cannot match every title.
const MIN_LOOKUP_CHARS: usize = 3;

/* ====== Conversation engine ======
   movies + index are read-only between retrains; handlers clone the Arc
   under a read guard, /retrain builds the replacement outside the lock and
   swaps it in whole. */

pub struct Engine {
    repo: MovieRepo,
    matcher: MatcherConfig,
    state: RwLock<Arc<EngineState>>,
}

struct EngineState {
    movies: Vec<Movie>,
    index: MatchIndex,
}

impl Engine {
    pub async fn bootstrap(repo: MovieRepo, config: &Config) -> Result<Self, BotError> {
        let state = build_state(&repo, config.matcher.clone()).await?;
        Ok(Self {
            repo,
            matcher: config.matcher.clone(),
            state: RwLock::new(Arc::new(state)),
        })
    }

    /// One reply per inbound text: direct title lookup first, best-match second.
    pub async fn reply(&self, text: &str) -> String {
        let state = self.current().await;
        compose_reply(&state.movies, &state.index, text)
    }

    /// Refetch movies and rebuild the index. Readers keep the old state until
    /// the swap; returns (movies, prompts) counts for the operator reply.
    pub async fn retrain(&self) -> Result<(usize, usize), BotError> {
        let next = build_state(&self.repo, self.matcher.clone()).await?;
        let counts = (next.movies.len(), next.index.len());
        *self.state.write().await = Arc::new(next);
        Ok(counts)
    }

    async fn current(&self) -> Arc<EngineState> {
        self.state.read().await.clone()
    }
}

async fn build_state(repo: &MovieRepo, matcher: MatcherConfig) -> Result<EngineState, BotError> {
    let movies = repo.fetch_movies().await?;
    let corpus = corpus::generate(&movies);
    info!(
        "loaded {} movies, generated {} template pairs",
        movies.len(),
        corpus.len()
    );
    let index = MatchIndex::build(corpus, matcher);
    Ok(EngineState { movies, index })
}

fn compose_reply(movies: &[Movie], index: &MatchIndex, text: &str) -> String {
    let query = text.trim();
    match lookup(movies, query) {
        Some(movie) => format_summary(movie),
        None => index.respond(query).to_string(),
    }
}

/// First movie whose title contains the query, or whose title appears inside
/// the query ("Tell me about Inception." names Inception). Case-insensitive.
pub fn lookup<'a>(movies: &'a [Movie], query: &str) -> Option<&'a Movie> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_LOOKUP_CHARS {
        return None;
    }
    movies.iter().find(|movie| {
        let title = movie.title.to_lowercase();
        if title.is_empty() {
            return false;
        }
        title.contains(&query)
            || (title.chars().count() >= MIN_LOOKUP_CHARS && query.contains(&title))
    })
}

/// Fixed multi-line summary for a direct title hit.
pub fn format_summary(movie: &Movie) -> String {
    let cast = if movie.cast.is_empty() {
        "N/A".to_string()
    } else {
        movie.cast.iter().take(5).cloned().collect::<Vec<_>>().join(", ")
    };
    format!(
        "🎬 {}\n📖 {}\n⭐ Genre: {}\n💯 Rating: {}\n🎭 Cast: {}",
        movie.title,
        movie.overview,
        movie.genre_label(),
        movie.vote_average,
        cast
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> Vec<Movie> {
        vec![
            Movie {
                id: 27205,
                title: "Inception".to_string(),
                genres: vec!["Action".to_string(), "Science Fiction".to_string()],
                overview: "A thief steals corporate secrets through dream-sharing technology."
                    .to_string(),
                vote_average: 8.3,
                cast: vec![
                    "Leonardo DiCaprio".to_string(),
                    "Joseph Gordon-Levitt".to_string(),
                    "Elliot Page".to_string(),
                    "Tom Hardy".to_string(),
                    "Ken Watanabe".to_string(),
                    "Cillian Murphy".to_string(),
                ],
            },
            Movie {
                id: 603,
                title: "The Matrix".to_string(),
                genres: vec!["Action".to_string()],
                overview: "A hacker learns the truth about his reality.".to_string(),
                vote_average: 8.2,
                cast: Vec::new(),
            },
        ]
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let movies = movies();
        let hit = lookup(&movies, "inception").unwrap();
        assert_eq!(hit.title, "Inception");
    }

    #[test]
    fn lookup_finds_title_inside_longer_query() {
        let movies = movies();
        let hit = lookup(&movies, "Tell me about Inception.").unwrap();
        assert_eq!(hit.title, "Inception");
    }

    #[test]
    fn lookup_returns_first_match_in_repository_order() {
        let movies = movies();
        assert_eq!(lookup(&movies, "matrix").unwrap().title, "The Matrix");
        // A query containing both titles resolves to the earlier movie.
        let both = "Is Inception better than The Matrix?";
        assert_eq!(lookup(&movies, both).unwrap().title, "Inception");
    }

    #[test]
    fn lookup_unknown_title_returns_none() {
        assert!(lookup(&movies(), "Zzzznotreal").is_none());
    }

    #[test]
    fn short_or_empty_queries_skip_the_shortcut() {
        let movies = movies();
        assert!(lookup(&movies, "").is_none());
        assert!(lookup(&movies, "  ").is_none());
        assert!(lookup(&movies, "it").is_none());
    }

    #[test]
    fn summary_contains_title_overview_and_rating() {
        let movies = movies();
        let summary = format_summary(&movies[0]);
        assert!(summary.contains("Inception"));
        assert!(summary.contains("dream-sharing technology"));
        assert!(summary.contains("8.3"));
        // Top-5 cast only.
        assert!(summary.contains("Ken Watanabe"));
        assert!(!summary.contains("Cillian Murphy"));
    }

    #[test]
    fn summary_shows_na_for_empty_cast() {
        let movies = movies();
        assert!(format_summary(&movies[1]).contains("🎭 Cast: N/A"));
    }

    #[test]
    fn direct_lookup_wins_over_matching_corpus_prompt() {
        let movies = movies();
        let index = MatchIndex::build(corpus::generate(&movies), MatcherConfig::default());
        // The corpus holds this exact prompt, but the shortcut answers first.
        let reply = compose_reply(&movies, &index, "Tell me about Inception.");
        assert!(reply.starts_with("🎬 Inception"));
    }

    #[test]
    fn corpus_answers_when_no_title_matches() {
        let movies = movies();
        let index = MatchIndex::build(corpus::generate(&movies), MatcherConfig::default());
        let reply = compose_reply(&movies, &index, "Can you recommend a movie?");
        assert_eq!(
            reply,
            "You should watch Inception. It's a Action, Science Fiction film with a rating of 8.3."
        );
    }

    #[test]
    fn unintelligible_input_gets_the_default_response() {
        let movies = movies();
        let index = MatchIndex::build(corpus::generate(&movies), MatcherConfig::default());
        assert_eq!(
            compose_reply(&movies, &index, "qwerty asdf zxcv"),
            "I'm sorry, but I don't understand."
        );
    }
}
