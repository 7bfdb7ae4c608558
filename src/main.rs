use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Builder;
use std::{
    io::{Read, Write},
    path::Path,
};
use wiki_link::{
    markdown, resolver::DEFAULT_HREF_PREFIX, vault, AliasSplit, Inline, ResolverConfig, Scanner,
    WikiLinkTranscoder,
};

fn command() -> Command {
    Command::new("wiki_link")
        .version("0.1.0")
        .about("Resolve [[wikilinks]] in a markdown document.")
        .arg(Arg::new("input").help("Markdown file to read. Reads stdin if omitted."))
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("What to print: rendered html, the round-tripped text or the links found.")
                .value_parser(["html", "text", "links"])
                .default_value("html"),
        )
        .arg(
            Arg::new("permalink")
                .short('p')
                .long("permalink")
                .help("A permalink of a page that exists. May be repeated.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("vault")
                .short('d')
                .long("vault")
                .help("Directory of markdown notes whose paths are existing permalinks."),
        )
        .arg(
            Arg::new("class")
                .long("class")
                .help("Class of every wikilink.")
                .default_value(wiki_link::resolver::DEFAULT_BASE_CLASS_NAME),
        )
        .arg(
            Arg::new("new-class")
                .long("new-class")
                .help("Extra class of wikilinks to pages that don't exist.")
                .default_value(wiki_link::resolver::DEFAULT_UNRESOLVED_CLASS_NAME),
        )
        .arg(
            Arg::new("href-prefix")
                .long("href-prefix")
                .help("Prefix of every link target.")
                .default_value(DEFAULT_HREF_PREFIX),
        )
        .arg(
            Arg::new("encode-href")
                .long("encode-href")
                .help("Percent-encode permalinks in link targets.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("identity-resolver")
                .long("identity-resolver")
                .help("Use page names as permalinks unchanged.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rejoin-alias")
                .long("rejoin-alias")
                .help("Keep text after a second ':' as part of the alias.")
                .action(ArgAction::SetTrue),
        )
}

fn config_from_matches(matches: &ArgMatches) -> Result<ResolverConfig> {
    let mut known: Vec<String> = matches
        .get_many::<String>("permalink")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if let Some(dir) = matches.get_one::<String>("vault") {
        known.extend(vault::known_permalinks(Path::new(dir))?);
    }

    let class = matches
        .get_one::<String>("class")
        .ok_or(anyhow!("Missing class name"))?;
    let new_class = matches
        .get_one::<String>("new-class")
        .ok_or(anyhow!("Missing new class name"))?;
    let prefix = matches
        .get_one::<String>("href-prefix")
        .ok_or(anyhow!("Missing href prefix"))?
        .to_owned();

    let mut config = ResolverConfig::default()
        .with_known_identifiers(known)
        .with_base_class_name(class)
        .with_unresolved_class_name(new_class);

    config = if matches.get_flag("encode-href") {
        config.with_href_template(move |permalink| {
            format!("{prefix}{}", urlencoding::encode(permalink))
        })
    } else {
        config.with_href_template(move |permalink| format!("{prefix}{permalink}"))
    };
    if matches.get_flag("identity-resolver") {
        config = config.with_resolver(|name| vec![name.to_owned()]);
    }
    if matches.get_flag("rejoin-alias") {
        config = config.with_alias_split(AliasSplit::Rejoin);
    }
    Ok(config)
}

fn render_html(transcoder: WikiLinkTranscoder, text: &str) -> String {
    let mut md = markdown_it::MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    markdown::add(&mut md, transcoder);
    md.parse(text).render()
}

fn render_text(transcoder: WikiLinkTranscoder, text: &str) -> String {
    let scanner = Scanner::new()
        .with_matcher(transcoder.clone())
        .with_renderer(transcoder);
    scanner.render(&scanner.parse(text))
}

/// One line per wikilink: target, permalink and whether the page exists.
fn render_links(transcoder: WikiLinkTranscoder, text: &str) -> String {
    let scanner = Scanner::new().with_matcher(transcoder);
    scanner
        .parse(text)
        .iter()
        .filter_map(|inline| match inline {
            Inline::WikiLink(node) => Some(format!(
                "{}\t{}\t{}\n",
                node.target(),
                node.permalink(),
                node.exists()
            )),
            Inline::Text(_) => None,
        })
        .collect()
}

fn run(matches: &ArgMatches) -> Result<String> {
    let config = config_from_matches(matches)?;
    log::debug!("Using {:?}.", config);
    let transcoder = WikiLinkTranscoder::new(config);

    let text = match matches.get_one::<String>("input") {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("html");
    log::info!("Rendering {} bytes as {}.", text.len(), format);
    Ok(match format {
        "text" => render_text(transcoder, &text),
        "links" => render_links(transcoder, &text),
        _ => render_html(transcoder, &text),
    })
}

fn main() -> Result<()> {
    // Initialize the logger.
    Builder::new()
        .filter(None, log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = command().get_matches();
    let output = run(&matches)?;
    std::io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write};

    use anyhow::Result;

    use super::*;

    fn config(args: &[&str]) -> Result<ResolverConfig> {
        let matches = command().try_get_matches_from(std::iter::once("wiki_link").chain(args.iter().copied()))?;
        config_from_matches(&matches)
    }

    #[test]
    fn command_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn default_config_from_no_args() -> Result<()> {
        let config = config(&[])?;
        assert!(config.known_identifiers.is_empty());
        assert_eq!(config.base_class_name, "internal");
        assert_eq!(config.unresolved_class_name, "new");
        assert_eq!(config.alias_split, AliasSplit::Truncate);
        assert_eq!(config.href("a_page"), "#/page/a_page");
        Ok(())
    }

    #[test]
    fn config_from_flags() -> Result<()> {
        let config = config(&[
            "-p",
            "wiki_link",
            "--permalink",
            "A Page",
            "--class",
            "wiki",
            "--new-class",
            "missing",
            "--href-prefix",
            "/wiki/",
            "--encode-href",
            "--identity-resolver",
            "--rejoin-alias",
        ])?;
        assert!(config.known_identifiers.contains("wiki_link"));
        assert!(config.known_identifiers.contains("A Page"));
        assert_eq!(config.base_class_name, "wiki");
        assert_eq!(config.unresolved_class_name, "missing");
        assert_eq!(config.alias_split, AliasSplit::Rejoin);
        assert_eq!(config.candidates("A Page"), vec!["A Page"]);
        assert_eq!(config.href("A Page"), "/wiki/A%20Page");
        Ok(())
    }

    #[test]
    fn config_from_vault() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        File::create(temp_dir.path().join("wiki_link.md"))?;
        let dir = temp_dir.path().to_str().ok_or(anyhow!("Non utf-8 temp dir"))?;

        let config = config(&["--vault", dir])?;
        assert!(config.known_identifiers.contains("wiki_link"));
        Ok(())
    }

    #[test]
    fn renders_every_format() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("note.md");
        let mut file = File::create(&path)?;
        write!(file, "Hey [[Wiki Link]] and [[Real Page:Alias]].")?;
        let path = path.to_str().ok_or(anyhow!("Non utf-8 temp dir"))?;

        let args = |format: &'static str| {
            command().try_get_matches_from(["wiki_link", path, "-p", "wiki_link", "-f", format])
        };

        let links = run(&args("links")?)?;
        assert_eq!(links, "Wiki Link\twiki_link\ttrue\nReal Page\treal_page\tfalse\n");

        let text = run(&args("text")?)?;
        assert_eq!(text, "Hey [[Wiki Link]] and [[Real Page:Alias]].");

        let html = run(&args("html")?)?;
        assert!(html.contains("<a href=\"#/page/wiki_link\" class=\"internal\">Wiki Link</a>"));
        assert!(html.contains("<a href=\"#/page/real_page\" class=\"internal new\">Alias</a>"));
        Ok(())
    }

    #[test]
    fn missing_input_file_is_an_error() -> Result<()> {
        let matches = command().try_get_matches_from(["wiki_link", "/no/such/note.md"])?;
        assert!(run(&matches).is_err());
        Ok(())
    }
}
