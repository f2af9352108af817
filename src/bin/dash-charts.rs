use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dash_charts::api::DEFAULT_BASE_URL;
use dash_charts::dashboard::DOWNLOAD_TABLE_ID;
use dash_charts::loader::load_download_table;
use dash_charts::viz::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use dash_charts::{
    CATALOG, Client, Dashboard, DashboardOptions, Diagnostics, DownloadTable, catalog_page,
    storage,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dash-charts",
    version,
    about = "Render project-health charts & fetch recent package downloads"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every dashboard chart from embedded stats JSON to SVG files.
    Render(RenderArgs),
    /// Fetch recent downloads of a package (and optionally save them).
    Downloads(DownloadsArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Stats JSON produced by the collector.
    #[arg(short, long)]
    data: PathBuf,
    /// Directory receiving one `<chart_id>.svg` per chart.
    #[arg(short, long, default_value = "charts")]
    out_dir: PathBuf,
    /// Width of each chart.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,
    /// Height of each chart.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,
    /// Locale for tick labels (e.g. en, de, fr).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct DownloadsArgs {
    /// Package name on the statistics service.
    #[arg(short, long, default_value = "napari")]
    package: String,
    /// Override the API base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Save rows to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Downloads(args) => cmd_downloads(args),
    }
}

fn print_diagnostics(diags: &Diagnostics) {
    for d in diags.entries() {
        eprintln!("warning: {}: {}", d.source, d.message);
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.data)?;
    let data: serde_json::Value = serde_json::from_str(&raw)?;
    let options = DashboardOptions {
        width: args.width,
        height: args.height,
        locale: args.locale,
    };
    let dash = Dashboard::build(&data, &catalog_page(CATALOG)?, &options);
    let written = dash.save_svgs(&args.out_dir)?;
    print_diagnostics(dash.diagnostics());
    eprintln!(
        "Wrote {} of {} charts to {}",
        written.len(),
        CATALOG.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_downloads(args: DownloadsArgs) -> Result<()> {
    let client = Client::with_base_url(args.base_url);
    let mut table = DownloadTable::new(DOWNLOAD_TABLE_ID);
    let mut diags = Diagnostics::new();
    load_download_table(&client, &args.package, &mut table, &mut diags);
    print_diagnostics(&diags);

    for row in table.rows() {
        println!("{}\t{}", row.date, row.downloads);
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(table.rows(), path)?,
            "json" => storage::save_json(table.rows(), path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", table.rows().len(), path.display());
    }
    Ok(())
}
