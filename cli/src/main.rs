//! docxmerge CLI - DOCX agreement/exhibit merge tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docxmerge::{DocumentPackage, Merger, NodeKind};

#[derive(Parser)]
#[command(name = "docxmerge")]
#[command(version)]
#[command(about = "Merge a DOCX agreement with exhibit documents", long_about = None)]
struct Cli {
    /// Main document
    #[arg(value_name = "FILE")]
    main: Option<PathBuf>,

    /// Exhibit document (repeatable, merged in order)
    #[arg(short, long = "exhibit", value_name = "FILE")]
    exhibits: Vec<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Skip malformed exhibits instead of aborting
    #[arg(long)]
    lenient: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a main document with exhibits
    Merge {
        /// Main document
        #[arg(value_name = "FILE")]
        main: PathBuf,

        /// Exhibit document (repeatable, merged in order)
        #[arg(short, long = "exhibit", value_name = "FILE")]
        exhibits: Vec<PathBuf>,

        /// Output file (defaults to <main>_merged.docx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip malformed exhibits instead of aborting
        #[arg(long)]
        lenient: bool,

        /// Fail when exhibit content references package-local media
        #[arg(long)]
        fail_on_unsupported: bool,

        /// Disable parallel exhibit parsing
        #[arg(long)]
        sequential: bool,

        /// Print merge statistics as JSON
        #[arg(long)]
        stats: bool,
    },

    /// Show package information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Merge {
            main,
            exhibits,
            output,
            lenient,
            fail_on_unsupported,
            sequential,
            stats,
        }) => cmd_merge(
            &main,
            &exhibits,
            output.as_deref(),
            lenient,
            fail_on_unsupported,
            sequential,
            stats,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: merge if a main document is provided
            if let Some(main) = cli.main {
                cmd_merge(
                    &main,
                    &cli.exhibits,
                    cli.output.as_deref(),
                    cli.lenient,
                    false,
                    false,
                    false,
                )
            } else {
                println!(
                    "{}",
                    "Usage: docxmerge <FILE> -e <EXHIBIT>... [-o OUTPUT]".yellow()
                );
                println!("       docxmerge --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_merge(
    main: &Path,
    exhibits: &[PathBuf],
    output: Option<&Path>,
    lenient: bool,
    fail_on_unsupported: bool,
    sequential: bool,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = main.file_stem().unwrap_or_default().to_string_lossy();
        main.with_file_name(format!("{stem}_merged.docx"))
    });

    let pb = ProgressBar::new(exhibits.len() as u64 + 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message(format!("Opening {}...", main.display()));
    pb.inc(1);

    let mut merger = Merger::new();
    if lenient {
        merger = merger.lenient();
    }
    if fail_on_unsupported {
        merger = merger.fail_on_unsupported();
    }
    if sequential {
        merger = merger.sequential();
    }

    pb.set_message(format!("Merging {} exhibit(s)...", exhibits.len()));
    let exhibit_refs: Vec<&Path> = exhibits.iter().map(|p| p.as_path()).collect();
    let result = merger.merge_files(main, &exhibit_refs)?;
    log::debug!(
        "assembled {} bytes from {} exhibit(s)",
        result.package.size(),
        result.stats.exhibits_merged
    );
    pb.inc(exhibits.len() as u64);

    pb.set_message("Writing output...");
    result.package.write_to_file(&output)?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    println!(
        "\n{} {}",
        "Merged".green().bold(),
        output.display().to_string().bold()
    );
    println!(
        "  {} exhibits merged: {}",
        "├─".dimmed(),
        result.stats.exhibits_merged
    );
    if result.stats.exhibits_skipped > 0 {
        println!(
            "  {} exhibits skipped: {}",
            "├─".dimmed(),
            result.stats.exhibits_skipped.to_string().yellow()
        );
    }
    if result.stats.nodes_dropped > 0 {
        println!(
            "  {} nodes dropped (local media): {}",
            "├─".dimmed(),
            result.stats.nodes_dropped.to_string().yellow()
        );
    }
    println!("  {} size: {} bytes", "└─".dimmed(), result.package.size());

    if stats {
        println!("{}", result.stats.to_json()?);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pkg = DocumentPackage::from_path(input)?;
    let metadata = pkg.metadata()?;
    let body = docxmerge::parse_body(&pkg.main_document_xml()?)?;

    println!("{} {}", "Package:".green().bold(), input.display());
    println!("  content part: {}", pkg.main_part());
    println!("  parts: {}", pkg.part_count());
    println!("  size: {} bytes", pkg.size());

    if !metadata.is_empty() {
        println!("\n{}", "Properties:".green().bold());
        if let Some(title) = &metadata.title {
            println!("  title: {title}");
        }
        if let Some(creator) = &metadata.creator {
            println!("  creator: {creator}");
        }
        if let Some(modified_by) = &metadata.last_modified_by {
            println!("  last modified by: {modified_by}");
        }
        if let Some(created) = &metadata.created {
            println!("  created: {created}");
        }
        if let Some(modified) = &metadata.modified {
            println!("  modified: {modified}");
        }
    }

    println!("\n{}", "Body:".green().bold());
    println!("  paragraphs: {}", body.paragraph_count());
    println!("  tables: {}", body.table_count());
    println!("  page breaks: {}", body.page_break_count());
    println!("  section properties: {}", body.section_props_count());
    let other = body
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Other)
        .count();
    if other > 0 {
        println!("  other nodes: {other}");
    }

    Ok(())
}

fn cmd_version() {
    println!("docxmerge {}", env!("CARGO_PKG_VERSION"));
}
