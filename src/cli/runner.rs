use tracing::info;
use tracing_subscriber::EnvFilter;

use s2catalogue::api::{
    CatalogueLayout, process_subscenes, resume_masks, resume_tile_metadata, run_catalogue,
    write_dataset_metadata,
};
use s2catalogue::types::Stage;

use super::args::CliArgs;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let params = args.params()?;
    let layout = CatalogueLayout::new(&params.output_dir);
    info!("Stage: {}", args.stage);
    info!("Output directory: {:?}", layout.root());

    match args.stage {
        Stage::All => {
            let report = run_catalogue(&params)?;
            info!(
                "Processed: subscenes={}, masks={}, rows={}",
                report.subscenes, report.masks, report.rows
            );
        }
        Stage::Images => {
            let acc = process_subscenes(&params, &layout)?;
            info!("Image tiles written: {}", acc.images().len());
        }
        Stage::Masks => {
            let acc = resume_masks(&params, &layout)?;
            info!("Mask tiles written: {}", acc.masks().len());
        }
        Stage::TileMetadata => {
            let rows = resume_tile_metadata(&layout)?;
            info!("Tile metadata rows: {}", rows);
        }
        Stage::DatasetMetadata => {
            write_dataset_metadata(&layout)?;
        }
    }

    Ok(())
}
