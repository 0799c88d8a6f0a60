pub mod article;
pub mod compose;
pub mod config;
pub mod images;
pub mod normalize;
pub mod render;
pub mod store;
pub mod telemetry;

use article::ArticleError;
use compose::ComposedArticle;
use config::Settings;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use store::{ArticleIndex, ImageProvider, IndexFile, TagStore};
use time::OffsetDateTime;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Normalize, validate and compose one article, then record it in `index`.
///
/// Nothing is written to disk here; see [`write_article`].
pub fn run(
    input: &str,
    settings: &Settings,
    images: &dyn ImageProvider,
    tags: &dyn TagStore,
    index: &mut dyn ArticleIndex,
    now: OffsetDateTime,
) -> Result<ComposedArticle, ArticleError> {
    let composed = compose_article(input, settings, images, tags, now)?;
    index.upsert(composed.entry.clone());
    Ok(composed)
}

/// Like [`run`], without touching any index.
pub fn compose_article(
    input: &str,
    settings: &Settings,
    images: &dyn ImageProvider,
    tags: &dyn TagStore,
    now: OffsetDateTime,
) -> Result<ComposedArticle, ArticleError> {
    let record =
        normalize::parse_with_default_author(input, &settings.default_author)?.into_valid()?;

    Ok(compose::compose(
        &record,
        &images.selected_images(),
        &tags.tags(),
        &settings.compose_options(),
        now,
    ))
}

/// Parse `input` and render only its body, with no images and no wrapper.
pub fn preview(input: &str, settings: &Settings) -> Result<String, ArticleError> {
    let record = normalize::parse_with_default_author(input, &settings.default_author)?;
    let opts = settings.compose_options();
    Ok(render::render_markdown_with_options(
        &record.markdown_body,
        &opts.render,
    ))
}

/// Write `<out_dir>/posts/<id>.html` and `<out_dir>/posts/<id>.json`.
pub fn write_article(out_dir: &Path, article: &ComposedArticle) -> Result<(), Box<dyn Error>> {
    let html_path = out_dir.join(article.html_path());
    let json_path = out_dir.join(article.json_path());

    if let Some(parent) = html_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&html_path, &article.html)?;
    // prettify JSON so it's easy to inspect / diff.
    fs::write(&json_path, serde_json::to_string_pretty(&article.entry)?)?;

    info!(id = %article.id, html = %html_path.display(), "wrote article");
    Ok(())
}

/// Read an input file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, Box<dyn Error>> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?
    };

    // pasted text is expected to be UTF-8; fall back to lossy conversion.
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(&e.into_bytes()).to_string()))
}

/// Single file mode: convert `input_path`, write the artifacts and update the
/// index file. Returns the composed article.
pub fn convert_file(
    input_path: &Path,
    settings: &Settings,
    images: &dyn ImageProvider,
    tags: &dyn TagStore,
    now: OffsetDateTime,
) -> Result<ComposedArticle, Box<dyn Error>> {
    let input = read_input(input_path)?;
    let mut index = IndexFile::load(&settings.index_path())?;

    let article = run(&input, settings, images, tags, &mut index, now)?;
    write_article(&settings.out_dir, &article)?;
    index.save()?;
    Ok(article)
}

/// Outcome of [`convert_all_in_dir`].
#[derive(Debug, Default)]
pub struct BulkSummary {
    pub converted: Vec<String>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Bulk mode: convert every `*.json` file under `input_root`, in path order.
///
/// Inputs that cannot be read, parsed, validated or written are logged and
/// collected in the summary; they do not stop the run. An article enters the
/// index only once its files are on disk, and the index is saved at the end.
pub fn convert_all_in_dir(
    input_root: &Path,
    settings: &Settings,
    now: OffsetDateTime,
) -> Result<BulkSummary, Box<dyn Error>> {
    let start_time = Instant::now();

    if !input_root.is_dir() {
        return Err(format!("input directory not found: {}", input_root.display()).into());
    }

    let mut entries: Vec<_> = WalkDir::new(input_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "json")
        })
        .collect();

    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let mut index = IndexFile::load(&settings.index_path())?;
    let no_images: Vec<store::ImageAsset> = Vec::new();
    let no_tags = store::TagSet::default();

    let total = entries.len();
    let mut summary = BulkSummary::default();

    for (count, entry) in entries.iter().enumerate() {
        let path = entry.path();

        let converted = read_input(path).and_then(|input| {
            let article = compose_article(&input, settings, &no_images, &no_tags, now)?;
            write_article(&settings.out_dir, &article)?;
            Ok(article)
        });

        match converted {
            Ok(article) => {
                index.upsert(article.entry.clone());
                info!(
                    progress = %format!("{}/{}", count + 1, total),
                    elapsed_ms = (start_time.elapsed().as_millis() as u64),
                    id = %article.id,
                    "converted {}",
                    path.display()
                );
                summary.converted.push(article.id);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping input");
                summary.failed.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    index.save()?;

    let total_secs = start_time.elapsed().as_secs_f64();
    info!(
        converted = summary.converted.len(),
        failed = summary.failed.len(),
        "done in {:.3}s",
        total_secs
    );
    Ok(summary)
}
