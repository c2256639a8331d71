mod cli;
mod view;

pub(crate) use cli::as_cli;
