use clap::Parser;
use postsmith::compose::ImagePosition;
use postsmith::config::Settings;
use postsmith::images;
use postsmith::normalize::EXAMPLE_INPUT;
use postsmith::render::Flavor;
use postsmith::store::{ArticleIndex, ImageLibrary, IndexFile, TagSet, TagStore};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Turn loosely formatted article JSON into publishable HTML.
#[derive(Parser, Debug)]
#[command(name = "postsmith", version, about)]
struct Cli {
    /// Article JSON file, or `-` to read stdin
    #[arg(required_unless_present_any = ["example", "list", "remove", "convert_all"])]
    input: Option<PathBuf>,

    /// YAML settings file
    #[arg(long, env = "POSTSMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Convert every *.json file under DIR
    #[arg(long, value_name = "DIR", conflicts_with = "input")]
    convert_all: Option<PathBuf>,

    /// Print the rendered body only; nothing is written
    #[arg(long)]
    preview: bool,

    /// Print an example input document
    #[arg(long)]
    example: bool,

    /// List indexed articles, optionally only those tagged TAG
    #[arg(long, value_name = "TAG", num_args = 0..=1, default_missing_value = "")]
    list: Option<String>,

    /// Remove an article from the index
    #[arg(long, value_name = "ID")]
    remove: Option<String>,

    /// Image file to embed (repeatable)
    #[arg(long = "image", value_name = "PATH")]
    images: Vec<PathBuf>,

    /// Extra tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Use the basic renderer
    #[arg(long)]
    basic: bool,

    /// Where images go: start, end or marker
    #[arg(long)]
    image_position: Option<ImagePosition>,

    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Author used when the input has none
    #[arg(long)]
    author: Option<String>,

    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

impl Cli {
    fn settings(&self) -> Result<Settings, Box<dyn Error>> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if self.basic {
            settings.flavor = Flavor::Basic;
        }
        if let Some(position) = self.image_position {
            settings.image_position = position;
        }
        if let Some(dir) = &self.out_dir {
            settings.out_dir = dir.clone();
        }
        if let Some(author) = &self.author {
            settings.default_author = author.clone();
        }
        Ok(settings)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    postsmith::telemetry::init(cli.log_level);

    match try_main(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<ExitCode, Box<dyn Error>> {
    if cli.example {
        println!("{EXAMPLE_INPUT}");
        return Ok(ExitCode::SUCCESS);
    }

    let settings = cli.settings()?;
    debug!(?settings, "effective settings");
    let now = OffsetDateTime::now_utc();

    if let Some(id) = &cli.remove {
        let mut index = IndexFile::load(&settings.index_path())?;
        if !index.remove(id) {
            return Err(format!("no article with id `{id}` in {}", index.path().display()).into());
        }
        index.save()?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(tag) = &cli.list {
        let index = IndexFile::load(&settings.index_path())?;
        let entries = if tag.is_empty() {
            index.entries().iter().collect::<Vec<_>>()
        } else {
            index.by_tag(tag)
        };
        for e in entries {
            println!("{}\t{}\t{}", e.id, e.date, e.title);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(dir) = &cli.convert_all {
        let summary = postsmith::convert_all_in_dir(dir, &settings, now)?;
        if summary.failed.is_empty() {
            return Ok(ExitCode::SUCCESS);
        }
        for (path, reason) in &summary.failed {
            eprintln!("failed: {}: {reason}", path.display());
        }
        return Ok(ExitCode::FAILURE);
    }

    // `required_unless_present_any` guarantees an input from here on.
    let input_path = cli.input.as_deref().ok_or("missing INPUT")?;

    if cli.preview {
        let input = postsmith::read_input(input_path)?;
        println!("{}", postsmith::preview(&input, &settings)?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut library = ImageLibrary::default();
    for path in &cli.images {
        let image = images::load_image(path, now)?;
        let id = image.id.clone();
        library.add(image);
        library.toggle(&id);
    }

    let mut tags = TagSet::default();
    for tag in &cli.tags {
        if !tags.add(tag) {
            warn!(tag = %tag, "ignoring blank or repeated tag");
        }
    }

    let article = postsmith::convert_file(input_path, &settings, &library, &tags, now)?;
    println!("{}", article.html);
    Ok(ExitCode::SUCCESS)
}
