use crate::command::{Command, CommandResult, Reply, TakeoverTrigger};
use crate::context::TerminalContext;
use crate::movie::Movie;
use crate::output::{Output, Takeover};

pub struct StarwarsCommand;

const STARWARS_HELP: &str = "Usage: starwars\nPlay Star Wars Episode IV in ASCII. Ctrl+C stops it.\n\n      --help     display this help and exit";

pub const MOVIE_ERROR: &str = "starwars: could not load the movie. Please try again later.";

impl Command for StarwarsCommand {
    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let asset = ctx.config.movie_asset.clone();
        let fetch = ctx.assets().fetch_text(&asset);
        Ok(Reply::Pending(Box::pin(async move {
            match fetch.await {
                Ok(script) => {
                    let movie = Movie::parse(&script);
                    if movie.is_empty() {
                        tracing::warn!("{} has no frames", asset);
                        Output::plain(MOVIE_ERROR)
                    } else {
                        tracing::debug!(frames = movie.frames().len(), "movie loaded");
                        Output::Takeover(Takeover::Movie(movie))
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to load {}: {}", asset, e);
                    Output::plain(MOVIE_ERROR)
                }
            }
        })))
    }

    fn usage(&self) -> &'static str {
        STARWARS_HELP
    }

    fn summary(&self) -> &'static str {
        "watch a long time ago in a galaxy far, far away"
    }

    fn takeover(&self) -> Option<TakeoverTrigger> {
        Some(TakeoverTrigger { loading: Some("Loading Star Wars") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;
    use crate::commands::testing::ctx;
    use futures::executor::block_on;
    use std::rc::Rc;

    fn play(assets: StaticAssets) -> Output {
        let mut ctx = ctx().with_assets(Rc::new(assets));
        match StarwarsCommand.execute(&[], &mut ctx) {
            Ok(Reply::Pending(fut)) => block_on(fut),
            other => panic!("expected pending reply, got {:?}", other),
        }
    }

    #[test]
    fn parsed_movie_becomes_takeover() {
        let out = play(StaticAssets::new().with("/starwars.txt", "3\nA long time ago\n"));
        match out {
            Output::Takeover(Takeover::Movie(movie)) => assert_eq!(movie.frames()[0].ticks, 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_or_empty_asset() {
        assert_eq!(play(StaticAssets::new()), Output::plain(MOVIE_ERROR));
        assert_eq!(
            play(StaticAssets::new().with("/starwars.txt", "no markers here")),
            Output::plain(MOVIE_ERROR)
        );
    }
}
