mod logger;

use anyhow::{Context, Result, bail};
use booklet_impose::{
    BookletOptions, BookletStatistics, DuplexFlip, FoldTopology, HeadingPolicy, Orientation,
    OverflowStep, PaperSize,
};
use clap::{Parser, Subcommand, ValueEnum};
use contact_list::Contact;
use logger::StderrLogger;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cbook", about = "Printable contact booklets", version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a folded contact booklet from CSV lists
    Booklet {
        /// Input CSV file(s), merged in order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long, required_unless_present = "stats_only")]
        output: Option<PathBuf>,

        /// Panels per sheet side (2, 4 or 8)
        #[arg(long)]
        fold: Option<usize>,

        /// Load booklet options from JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the effective options to JSON
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Paper orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Cover title
        #[arg(long)]
        title: Option<String>,

        /// Owner name on the cover
        #[arg(long)]
        owner: Option<String>,

        /// Date line on the cover (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Image placed on the back cover
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Repeat the letter heading when a group continues on a new page
        #[arg(long)]
        repeat_headings: bool,

        /// Granularity of pages added past the first sheet
        #[arg(long, value_enum)]
        overflow: Option<OverflowArg>,

        /// How the printer turns sheets for the back side
        #[arg(long, value_enum)]
        duplex: Option<DuplexArg>,

        /// Leave pages unnumbered
        #[arg(long)]
        no_page_numbers: bool,

        /// Leave out the dashed fold guides
        #[arg(long)]
        no_fold_guides: bool,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Merge CSV lists, dropping repeated entries
    Merge {
        /// Input CSV files, merged in order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List numbers shared by several names
    Duplicates {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Keep only NAME for NUMBER, given as NUMBER=NAME
        #[arg(long, value_parser = parse_keep)]
        keep: Vec<(String, String)>,

        /// Where to write the cleaned list (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum OverflowArg {
    Folio,
    Sheet,
}

#[derive(Clone, Copy, ValueEnum)]
enum DuplexArg {
    LeftRight,
    TopBottom,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<OverflowArg> for OverflowStep {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Folio => Self::Folio,
            OverflowArg::Sheet => Self::Sheet,
        }
    }
}

impl From<DuplexArg> for DuplexFlip {
    fn from(arg: DuplexArg) -> Self {
        match arg {
            DuplexArg::LeftRight => Self::LeftRight,
            DuplexArg::TopBottom => Self::TopBottom,
        }
    }
}

fn parse_keep(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((number, name)) if !number.trim().is_empty() && !name.trim().is_empty() => {
            Ok((number.trim().to_string(), name.trim().to_string()))
        }
        _ => Err(format!("expected NUMBER=NAME, got {:?}", s)),
    }
}

async fn load_merged(inputs: &[PathBuf]) -> Result<Vec<Contact>> {
    let mut contacts = Vec::new();
    for path in inputs {
        let loaded = contact_list::load_from_csv(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let total = loaded.len();
        let added = contact_list::merge_contacts(&mut contacts, loaded);
        log::info!(
            "{}: {} contacts, {} new",
            path.display(),
            total,
            added
        );
    }
    Ok(contacts)
}

fn print_statistics(stats: &BookletStatistics) {
    println!("Booklet Statistics:");
    println!("  Contacts: {}", stats.contacts);
    println!("  Letter groups: {}", stats.letter_groups);
    println!("  Half-pages: {}", stats.half_pages);
    println!("  Booklet pages: {}", stats.booklet_pages);
    println!("  Blank pages: {}", stats.blank_pages);
    println!(
        "  Sheets: {} ({} sheet equivalent, {} printed sides)",
        stats.physical_sheets, stats.sheet_equivalent, stats.printed_sides
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::from_verbosity(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Booklet {
            input,
            output,
            fold,
            config,
            save_config,
            paper,
            orientation,
            title,
            owner,
            date,
            logo,
            repeat_headings,
            overflow,
            duplex,
            no_page_numbers,
            no_fold_guides,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => BookletOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => BookletOptions::default(),
            };

            if let Some(panels) = fold {
                options.topology = FoldTopology::from_panels(panels)?;
            }
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if repeat_headings {
                options.heading_policy = HeadingPolicy::RepeatOnContinuation;
            }
            if let Some(overflow) = overflow {
                options.overflow = overflow.into();
            }
            if let Some(duplex) = duplex {
                options.duplex = Some(duplex.into());
            }
            if no_page_numbers {
                options.page_numbers = false;
            }
            if no_fold_guides {
                options.fold_guides = false;
            }
            if let Some(title) = title {
                options.cover.title = title;
            }
            if let Some(owner) = owner {
                options.cover.owner = owner;
            }
            match date {
                Some(date) => options.cover.date_text = date,
                None if options.cover.date_text.is_empty() => {
                    options.cover.date_text =
                        format!("Édité le {}", chrono::Local::now().format("%d/%m/%Y"));
                }
                None => {}
            }
            if logo.is_some() {
                options.cover.logo = logo;
            }

            options.validate()?;
            if let Some(path) = &save_config {
                options
                    .save(path)
                    .await
                    .with_context(|| format!("Failed to save {}", path.display()))?;
                println!("Options saved → {}", path.display());
            }

            let contacts = load_merged(&input).await?;
            let stats = booklet_impose::calculate_statistics(&contacts, &options)?;
            print_statistics(&stats);

            if stats_only {
                return Ok(());
            }
            let Some(output) = output else {
                bail!("No output file given");
            };

            let doc = booklet_impose::generate_booklet(&contacts, &options).await?;
            booklet_impose::save_pdf(doc, &output).await?;
            println!(
                "Generated {}-panel booklet of {} contacts → {}",
                options.topology.panels(),
                stats.contacts,
                output.display()
            );
        }

        Commands::Merge { input, output } => {
            let contacts = load_merged(&input).await?;
            contact_list::save_to_csv(&output, &contacts)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Merged {} contacts → {}", contacts.len(), output.display());
        }

        Commands::Duplicates {
            input,
            keep,
            output,
        } => {
            let mut contacts = contact_list::load_from_csv(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;

            if keep.is_empty() {
                report_duplicates(&contacts);
                return Ok(());
            }

            for (number, name) in &keep {
                if !contact_list::resolve_duplicate(&mut contacts, number, name) {
                    bail!("No contact {:?} with number {}", name, number);
                }
            }
            let target: &Path = output.as_deref().unwrap_or(&input);
            contact_list::save_to_csv(target, &contacts)
                .await
                .with_context(|| format!("Failed to write {}", target.display()))?;
            println!("Resolved {} numbers → {}", keep.len(), target.display());
        }
    }

    Ok(())
}

fn report_duplicates(contacts: &[Contact]) {
    let groups = contact_list::duplicate_numbers(contacts);
    if groups.is_empty() {
        println!("No shared numbers");
        return;
    }
    for group in &groups {
        println!("{}: {}", group.number, group.names.join(", "));
    }
}
