use crate::repo::Movie;

/// One trainable pair: a prompt phrasing and the reply it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateEntry {
    pub prompt: String,
    pub response: String,
}

/// Expand every movie into its fixed template groups, in movie order.
/// Pure: same movies in, same corpus out. Missing fields substitute as
/// empty strings, never skip an entry; an empty cast just contributes no
/// actor entries for that movie.
pub fn generate(movies: &[Movie]) -> Vec<TemplateEntry> {
    let mut corpus = Vec::new();
    for movie in movies {
        push_movie_entries(&mut corpus, movie);
    }
    corpus
}

fn push_movie_entries(corpus: &mut Vec<TemplateEntry>, movie: &Movie) {
    let title = &movie.title;
    let genre = movie.genre_label();
    let overview = &movie.overview;
    let rating = movie.vote_average;
    let cast_label = movie.cast.join(", ");

    let mut pair = |prompt: String, response: String| {
        corpus.push(TemplateEntry { prompt, response });
    };

    // Generic recommendation prompts. Every movie claims the same phrasings;
    // the first movie in repository order wins them at match time.
    pair(
        "Can you recommend a movie?".into(),
        format!("You should watch {title}. It's a {genre} film with a rating of {rating}."),
    );
    pair(
        "Suggest a good movie.".into(),
        format!("You might like {title}, a highly rated {genre} film."),
    );
    pair(
        "What's a great movie to watch?".into(),
        format!("I recommend {title}. It's a {genre} movie with a {rating} rating."),
    );
    pair(
        "Give me a movie suggestion.".into(),
        format!("Sure! Try {title}, a fantastic {genre} film."),
    );
    pair(
        "What is a popular movie right now?".into(),
        format!("{title} is trending! It's a {genre} movie with a rating of {rating}."),
    );
    pair(
        "I want to watch something interesting.".into(),
        format!("How about {title}? It's a {genre} film with a compelling story."),
    );
    pair(
        "Give me a critically acclaimed movie.".into(),
        format!("{title} has received great reviews and has a rating of {rating}."),
    );
    pair(
        "What movie should I watch tonight?".into(),
        format!("Try watching {title}, a top-rated {genre} film."),
    );
    pair(
        "Surprise me with a movie!".into(),
        format!("You might enjoy {title}, a highly rated {genre} movie."),
    );

    // Questions about this movie.
    pair(
        format!("Tell me about {title}."),
        format!("{title} is a {genre} movie. Overview: {overview}"),
    );
    pair(
        format!("What's {title} about?"),
        format!("{title} is a {genre} movie. Here's the synopsis: {overview}"),
    );
    pair(
        format!("Can you describe {title}?"),
        format!("{title} is a {genre} film with this storyline: {overview}"),
    );
    pair(
        format!("What makes {title} special?"),
        format!("{title} is a fan favorite, known for its {genre} story and a rating of {rating}."),
    );
    pair(
        format!("Why is {title} famous?"),
        format!("{title} is well-known for its {genre} storyline and outstanding performances."),
    );

    // Genre questions.
    pair(
        format!("What genre is {title}?"),
        format!("{title} falls under the {genre} genre."),
    );
    pair(
        format!("Is {title} an action movie?"),
        format!("{title} is a {genre} movie."),
    );
    pair(
        format!("Does {title} have any comedy?"),
        format!("{title} is a {genre} film."),
    );
    pair(
        format!("I like {genre} movies. Any suggestions?"),
        format!("You might like {title}, a great {genre} film!"),
    );
    pair(
        format!("What are some must-watch {genre} films?"),
        format!("{title} is one of the best {genre} movies!"),
    );

    // Rating questions.
    pair(
        format!("Is {title} a good movie?"),
        format!("{title} has a rating of {rating}. Many viewers liked it!"),
    );
    pair(
        format!("Would you recommend {title}?"),
        format!("Yes! {title} has a rating of {rating} and is well-received."),
    );
    pair(
        format!("What do people think about {title}?"),
        format!("{title} has a {rating} rating and is considered a {genre} classic."),
    );
    pair(
        format!("Should I watch {title}?"),
        format!("If you enjoy {genre} movies, you'll probably like {title}. It has a {rating} rating."),
    );

    // One group per cast member.
    for actor in &movie.cast {
        pair(
            format!("Which movies feature {actor}?"),
            format!("{actor} stars in {title}."),
        );
        pair(
            format!("Has {actor} been in any famous movies?"),
            format!("Yes! {actor} appeared in {title}, a popular {genre} film."),
        );
        pair(
            format!("Tell me a movie with {actor}."),
            format!("{actor} is in {title}, which is a {genre} movie."),
        );
        pair(
            format!("Give me a list of {actor}'s movies."),
            format!("{actor} starred in {title} and more films."),
        );
        pair(
            format!("Is {actor} a good actor?"),
            format!("{actor} is well known for their performances in movies like {title}."),
        );
        pair(
            format!("What is {actor} best known for?"),
            format!("{actor} is famous for starring in movies like {title}."),
        );
        pair(
            format!("Who are some co-stars of {actor}?"),
            format!("In {title}, {actor} starred alongside {cast_label}."),
        );
        pair(
            format!("Has {actor} worked in {genre} movies?"),
            format!("Yes, {actor} has appeared in {genre} movies like {title}."),
        );
    }
}
