use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sampled_prm::math::Rect;
use sampled_prm::{
    random_start_goal, BenchmarkSummary, Distribution, EdgeValidation, ObstacleSet,
    ObstacleSource, Planner, PlannerAttributes, PointSampler,
};

/// The uniform and scrambled Sobol samplers are planned this many times per start and goal.
const RANDOMISED_REPEATS: usize = 10;

struct Args {
    iterations: usize,
    attributes: PlannerAttributes,
    obstacles: bool,
    level: u32,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut result = Args {
        iterations: 10,
        attributes: PlannerAttributes::default(),
        obstacles: false,
        level: 1,
        seed: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
        match arg.as_str() {
            "--iterations" | "-i" => result.iterations = parse(&value()?)?,
            "--nodes" | "-n" => result.attributes.num_samples = parse(&value()?)?,
            "--k-nearest" | "-k" => result.attributes.k = parse(&value()?)?,
            "--radius" | "-r" => result.attributes.robot_radius = parse(&value()?)?,
            "--seed" | "-s" => result.seed = Some(parse(&value()?)?),
            "--obstacles" | "-o" => result.obstacles = true,
            "--level" | "-l" => result.level = parse(&value()?)?,
            "--eager" => result.attributes.edge_validation = EdgeValidation::Eager,
            "--help" | "-h" => return Err(String::new()),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(result)
}

fn parse<T: std::str::FromStr>(value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value: {}", value))
}

fn print_help() {
    println!("sampled-prm - compares point samplers on a probabilistic roadmap");
    println!();
    println!("USAGE:");
    println!("    sampled-prm [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -i, --iterations <N>    Start and goal pairs to plan between (default: 10)");
    println!("    -n, --nodes <N>         Samples per episode (default: 32)");
    println!("    -k, --k-nearest <K>     Neighbours per configuration (default: 15)");
    println!("    -r, --radius <R>        Robot radius (default: 10)");
    println!("    -s, --seed <SEED>       Seed for reproducible runs");
    println!("    -o, --obstacles         Place obstacles on the map");
    println!("    -l, --level <LEVEL>     Obstacle layout, 1 to 3 (default: 1)");
    println!("        --eager             Check edges while building the roadmap");
    println!("    -h, --help              Print help information");
}

/// Layouts of walls which get harder to pass as the level increases.
struct WallLevels;

impl ObstacleSource for WallLevels {
    fn obstacles(&self, level: u32) -> ObstacleSet {
        let mut obstacles = ObstacleSet::new();
        obstacles.add(Rect::new(0.0, 140.0, 420.0, 20.0));
        if level >= 2 {
            obstacles.add(Rect::new(220.0, 320.0, 420.0, 20.0));
        }
        if level >= 3 {
            obstacles.add(Rect::new(300.0, 200.0, 40.0, 80.0));
            obstacles.add(Rect::new(80.0, 220.0, 60.0, 60.0));
        }
        obstacles
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{}", msg);
            }
            print_help();
            std::process::exit(if msg.is_empty() { 0 } else { 1 });
        }
    };

    let attribs = args.attributes;
    let planner = Planner::new(attribs);
    let obstacles = if args.obstacles {
        WallLevels.obstacles(args.level)
    } else {
        ObstacleSet::new()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut sampler = match args.seed {
        Some(seed) => PointSampler::seeded(seed.wrapping_add(1)),
        None => PointSampler::from_entropy(),
    };

    // Precomputed point sets are not available here
    let distributions = Distribution::ALL
        .into_iter()
        .filter(|dist| *dist != Distribution::Mpmc)
        .filter(|dist| match dist.validate(attribs.num_samples) {
            Ok(()) => true,
            Err(err) => {
                warn!("skipping: {}", err);
                false
            }
        })
        .collect::<Vec<_>>();
    let mut summaries = vec![BenchmarkSummary::new(); distributions.len()];

    info!(
        "planning {} start/goal pairs with {} samples, k = {}",
        args.iterations, attribs.num_samples, attribs.k
    );
    for _ in 0..args.iterations {
        let (start, goal) = random_start_goal(
            &mut rng,
            attribs.map_width as u32,
            attribs.map_height as u32,
        );
        for (dist, summary) in distributions.iter().zip(&mut summaries) {
            let repeats = if matches!(dist, Distribution::Uniform | Distribution::SobolScrambled) {
                RANDOMISED_REPEATS
            } else {
                1
            };
            for _ in 0..repeats {
                match planner.plan_with_sampler(start, goal, &obstacles, &mut sampler, *dist) {
                    Ok(episode) => summary.record(&episode),
                    Err(err) => {
                        error!("{}: {}", dist, err);
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    for (dist, summary) in distributions.iter().zip(&summaries) {
        info!(
            "{:>12}: success {:5.1}% of {:3}, length {:7.1} ± {:5.1}, cardinality {:6.1} ± {:4.1}",
            dist.name(),
            summary.success_rate(),
            summary.episodes(),
            summary.mean_length().unwrap_or(f64::NAN),
            summary.std_length().unwrap_or(f64::NAN),
            summary.mean_cardinality().unwrap_or(f64::NAN),
            summary.std_cardinality().unwrap_or(f64::NAN),
        );
    }
}
