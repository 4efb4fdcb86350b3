// Command line utility for running multilevel community detection on an edge list

use anyhow::{bail, Context, Error};
use clap::{value_parser, Arg, Command};
use flate2::bufread::MultiGzDecoder;
use itertools::Itertools;
use ksets::{read_edge_list, Communities, Config, InitialPartition, InputFormat, Louvain, Objective, VisitOrder};
use log::{info, warn};
use std::fs::{create_dir, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("ksets-cmd")
        .arg(
            Arg::new("INPUT")
                .help("edge list to cluster, optionally gzipped")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("OUT_DIR")
                .help("Output directory")
                .short('o')
                .long("out_dir")
                .default_value(".")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("FORMAT")
                .help("Columns per edge record: 'two' (unweighted) or 'three' (weighted)")
                .short('f')
                .long("format")
                .default_value("two")
                .value_parser(["two", "three", "2", "3"]),
        )
        .arg(
            Arg::new("VCOUNT")
                .help("Number of vertices; inferred from the largest id when omitted")
                .short('n')
                .long("vcount")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("OBJECTIVE")
                .help("Local moving objective")
                .long("objective")
                .default_value("modularity")
                .value_parser(["modularity", "ksets+"]),
        )
        .arg(
            Arg::new("INITIAL_CLUSTERS")
                .help("Start from k round-robin clusters instead of singletons")
                .short('k')
                .long("initial_clusters")
                .value_parser(value_parser!(usize))
                .conflicts_with("INITIAL_LABELS"),
        )
        .arg(
            Arg::new("INITIAL_LABELS")
                .help("File with one starting label per vertex")
                .long("initial_labels")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("SEED")
                .help("Visit vertices in a random order drawn from this seed")
                .short('s')
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .get_matches();

    let input: &PathBuf = matches.get_one("INPUT").unwrap();
    let out_dir: &PathBuf = matches.get_one("OUT_DIR").unwrap();
    let format: InputFormat = matches.get_one::<String>("FORMAT").unwrap().parse().map_err(Error::msg)?;
    let vcount: Option<usize> = matches.get_one("VCOUNT").copied();
    let objective: Objective = matches.get_one::<String>("OBJECTIVE").unwrap().parse().map_err(Error::msg)?;
    if let Some(message) = objective_warning(objective) {
        warn!("{message}");
    }

    let initial = if let Some(&k) = matches.get_one::<usize>("INITIAL_CLUSTERS") {
        InitialPartition::RoundRobin(k)
    } else if let Some(path) = matches.get_one::<PathBuf>("INITIAL_LABELS") {
        InitialPartition::Labels(load_labels(path)?)
    } else {
        InitialPartition::Singletons
    };
    let visit_order = match matches.get_one::<u64>("SEED") {
        Some(&seed) => VisitOrder::Shuffled { seed },
        None => VisitOrder::Sequential,
    };

    let network =
        read_edge_list(open_input(input)?, format, vcount).with_context(|| input.display().to_string())?;
    info!("loaded {} vertices and {} edges from {}", network.nodes(), network.edges(), input.display());

    let config = Config {
        objective,
        visit_order,
        initial,
    };
    let communities = Louvain::new(config).run(network)?;

    if !out_dir.exists() {
        create_dir(out_dir).with_context(|| out_dir.display().to_string())?;
    }
    write_output(&communities, out_dir)?;
    info!(
        "wrote {} communities to {} (modularity {:.6})",
        communities.num_communities(),
        out_dir.display(),
        communities.modularity
    );

    Ok(())
}

/// Caveat to surface for objectives that cannot change the clustering
fn objective_warning(objective: Objective) -> Option<String> {
    match objective {
        Objective::Modularity => None,
        Objective::KSetsPlus => Some(format!(
            "objective '{objective}' has no scoring rule yet; local moving will not move any vertex"
        )),
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let file = BufReader::new(File::open(path).with_context(|| path.display().to_string())?);
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(file))
    }
}

fn load_labels(path: &Path) -> Result<Vec<usize>, Error> {
    let mut labels = Vec::new();
    for (i, line) in open_input(path)?.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<usize>() {
            Ok(label) => labels.push(label),
            Err(e) => bail!("{}: bad label on line {}: {e}", path.display(), i + 1),
        }
    }
    Ok(labels)
}

fn write_output(communities: &Communities, out_dir: &Path) -> Result<(), Error> {
    let create = |name: &str| -> Result<BufWriter<File>, Error> {
        let path = out_dir.join(name);
        Ok(BufWriter::new(File::create(&path).with_context(|| path.display().to_string())?))
    };

    let mut labels = create("labels.txt")?;
    write_labels(communities, &mut labels)?;
    labels.flush()?;

    let mut groups = create("communities.txt")?;
    write_groups(communities, &mut groups)?;
    groups.flush()?;

    let mut levels = create("levels.txt")?;
    write_levels(communities, &mut levels)?;
    levels.flush()?;
    Ok(())
}

/// One label per line, in original vertex order
fn write_labels(communities: &Communities, writer: &mut impl Write) -> Result<(), Error> {
    for label in &communities.labels {
        writeln!(writer, "{label}")?;
    }
    Ok(())
}

/// One community per line, as space separated vertex ids
fn write_groups(communities: &Communities, writer: &mut impl Write) -> Result<(), Error> {
    for group in communities.groups() {
        writeln!(writer, "{}", group.iter().join(" "))?;
    }
    Ok(())
}

/// Cluster count after each contraction, then local moving rounds per level
fn write_levels(communities: &Communities, writer: &mut impl Write) -> Result<(), Error> {
    writeln!(writer, "{}", communities.level_sizes.iter().join(" "))?;
    writeln!(writer, "{}", communities.level_rounds.iter().join(" "))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Communities {
        Communities {
            labels: vec![1, 1, 0, 0, 1],
            level_sizes: vec![2],
            level_rounds: vec![2, 1],
            modularity: 0.25,
        }
    }

    fn render(f: impl Fn(&Communities, &mut Vec<u8>) -> Result<(), Error>) -> String {
        let mut buf = Vec::new();
        f(&sample(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_ksets_plus_is_flagged() {
        assert!(objective_warning(Objective::Modularity).is_none());
        let message = objective_warning(Objective::KSetsPlus).unwrap();
        assert!(message.contains("will not move any vertex"));
    }

    #[test]
    fn test_writers() {
        assert_eq!(render(|c, w| write_labels(c, w)), "1\n1\n0\n0\n1\n");
        assert_eq!(render(|c, w| write_groups(c, w)), "2 3\n0 1 4\n");
        assert_eq!(render(|c, w| write_levels(c, w)), "2\n2 1\n");
    }
}
