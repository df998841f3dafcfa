use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use metalgraph::{
    dataset::{extract_tag_lists, tag_frequencies, weighted_tokens, DatasetSource},
    graph::GraphMetrics,
    lastfm::{LastFmMethod, RequestBuilder},
    persistence,
    pipeline::GraphBuildPipeline,
    types::{Field, Metric},
    TagGraphConfig,
};

#[derive(Parser, Debug)]
#[command(name = "metalgraph", about = "Heavy-metal tag graph CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the tag graph, keep the top-K tags and write it as JSON.
    Graph {
        /// Path to the album dataset (JSONL)
        #[arg(long)]
        dataset: PathBuf,
        /// Output path for the graph export
        #[arg(long)]
        output: PathBuf,
        /// Path to config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of tags to keep
        #[arg(long)]
        top_k: Option<usize>,
        /// Node attribute to rank tags by
        #[arg(long)]
        attribute: Option<String>,
    },

    /// Print summary metrics of the full tag graph.
    Stats {
        /// Path to the album dataset (JSONL)
        #[arg(long)]
        dataset: PathBuf,
    },

    /// Print tag counts, or the top artists/albums by a metric.
    Tags {
        /// Path to the album dataset (JSONL)
        #[arg(long)]
        dataset: PathBuf,
        /// Number of entries to print (defaults to the cloud threshold)
        #[arg(long)]
        limit: Option<usize>,
        /// Rank artist or album names instead of tags
        #[arg(long, value_enum, requires = "metric")]
        field: Option<FieldArg>,
        /// Metric used with --field
        #[arg(long, value_enum, requires = "field")]
        metric: Option<MetricArg>,
    },

    /// Print a Last.fm request URL.
    Request {
        /// API method (album.search, album.getinfo, track.getinfo)
        #[arg(long)]
        method: String,
        /// Last.fm API key
        #[arg(long, env = "LASTFM_API_KEY")]
        api_key: String,
        /// Method argument as key=value; may be repeated
        #[arg(long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FieldArg {
    Artist,
    Album,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum MetricArg {
    Listeners,
    Playcount,
    Score,
}

impl From<FieldArg> for Field {
    fn from(f: FieldArg) -> Self {
        match f {
            FieldArg::Artist => Field::Artist,
            FieldArg::Album => Field::Album,
        }
    }
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Listeners => Metric::Listeners,
            MetricArg::Playcount => Metric::Playcount,
            MetricArg::Score => Metric::Score,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    Ok((k.to_string(), v.to_string()))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Graph { dataset, output, config, top_k, attribute } => {
            cmd_graph(dataset, output, config, top_k, attribute)?;
        }
        Commands::Stats { dataset } => {
            cmd_stats(dataset)?;
        }
        Commands::Tags { dataset, limit, field, metric } => {
            cmd_tags(dataset, limit, field, metric)?;
        }
        Commands::Request { method, api_key, args } => {
            cmd_request(&method, api_key, &args)?;
        }
    }

    Ok(())
}

fn cmd_graph(
    dataset: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    top_k: Option<usize>,
    attribute: Option<String>,
) -> anyhow::Result<()> {
    // 1) Load config, then apply flag overrides
    let mut config = match config_path {
        Some(path) => TagGraphConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TagGraphConfig::default(),
    };
    if let Some(k) = top_k {
        config.top_k = k;
    }
    if let Some(attr) = attribute {
        config.rank_attribute = attr;
    }
    tracing::info!("Using config: {:?}", config);

    // 2) Build and filter
    let pipeline = GraphBuildPipeline::new(config.clone());
    let out = pipeline.run(DatasetSource::Jsonl(dataset))?;

    // 3) Save
    persistence::save_graph(&output, &out.filtered, &config)?;
    println!(
        "Wrote {} tags and {} edges to {}",
        out.filtered.node_count(),
        out.filtered.edge_count(),
        output.display()
    );
    Ok(())
}

fn cmd_stats(dataset: PathBuf) -> anyhow::Result<()> {
    let config = TagGraphConfig {
        top_k: usize::MAX,
        ..Default::default()
    };
    let out = GraphBuildPipeline::new(config).run(DatasetSource::Jsonl(dataset))?;
    let m = GraphMetrics::compute(&out.graph);

    println!("Albums with tags: {}", out.tag_lists.len());
    println!("Tags (nodes):     {}", m.num_nodes);
    println!("Edges:            {}", m.num_edges);
    println!("Average degree:   {:.2}", m.avg_degree);
    println!("Density:          {:.3}", m.density);
    if let Some((name, w)) = &m.heaviest_node {
        println!("Heaviest tag:     {} ({})", name, w);
    }
    if let Some((u, v, w)) = &m.heaviest_edge {
        println!("Heaviest pair:    {} -- {} ({})", u, v, w);
    }
    Ok(())
}

fn cmd_tags(
    dataset: PathBuf,
    limit: Option<usize>,
    field: Option<FieldArg>,
    metric: Option<MetricArg>,
) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(TagGraphConfig::default().cloud_threshold);
    let records = DatasetSource::Jsonl(dataset).load()?;

    match (field, metric) {
        (Some(field), Some(metric)) => {
            for (token, value) in weighted_tokens(&records, field.into(), metric.into(), limit) {
                println!("{value:>14.1}  {token}");
            }
        }
        _ => {
            let lists = extract_tag_lists(&records)?;
            for (tag, n) in tag_frequencies(&lists).into_iter().take(limit) {
                println!("{n:>8}  {tag}");
            }
        }
    }
    Ok(())
}

fn cmd_request(method: &str, api_key: String, args: &[(String, String)]) -> anyhow::Result<()> {
    let method: LastFmMethod = method.parse()?;
    let pairs: Vec<(&str, &str)> = args.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let url = RequestBuilder::new(api_key).build(method, &pairs)?;
    println!("{url}");
    Ok(())
}
