mod audio;
mod config;
mod error;
mod library;
mod logging;
mod metadata;
mod player;
mod runtime;
mod ui;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
