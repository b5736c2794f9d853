use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fuzzy_irrigation::{AndOp, DefuzzificationOp, Inputs, MamdaniInference, OrOp, ProductionLink, Rules};
use tracing::{info, Level};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Sum of each term's vertex centroid over the sum of degrees
    VertexMean,
    /// Degree-weighted mean of each term's vertex centroid
    WeightedVertexMean,
    /// Center of gravity of the aggregated output set
    Cog,
}

impl From<Method> for DefuzzificationOp {
    fn from(method: Method) -> Self {
        match method {
            Method::VertexMean => DefuzzificationOp::VertexMean,
            Method::WeightedVertexMean => DefuzzificationOp::WeightedVertexMean,
            Method::Cog => DefuzzificationOp::Cog,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum And {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl From<And> for AndOp {
    fn from(and: And) -> Self {
        match and {
            And::Min => AndOp::Min,
            And::Prod => AndOp::Prod,
            And::BoundedProd => AndOp::BoundedProd,
            And::DrasticProd => AndOp::DrasticProd,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Or {
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl From<Or> for OrOp {
    fn from(or: Or) -> Self {
        match or {
            Or::Max => OrOp::Max,
            Or::ProbOr => OrOp::ProbOr,
            Or::BoundedSum => OrOp::BoundedSum,
            Or::DrasticSum => OrOp::DrasticSum,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Aggregation {
    Min,
    Max,
}

impl From<Aggregation> for ProductionLink {
    fn from(aggregation: Aggregation) -> Self {
        match aggregation {
            Aggregation::Min => ProductionLink::Min,
            Aggregation::Max => ProductionLink::Max,
        }
    }
}

#[derive(Parser)]
#[command(name = "fuzzy-irrigation")]
#[command(about = "Recommends an amount of irrigation water from air temperature and soil moisture")]
struct Args {
    /// Air temperature reading; prompted for when omitted
    #[arg(short, long, allow_negative_numbers = true)]
    air_temperature: Option<i32>,

    /// Soil moisture reading within 0..=100; prompted for when omitted
    #[arg(short, long, allow_negative_numbers = true)]
    soil_moisture: Option<i32>,

    /// Defuzzification method
    #[arg(short, long, value_enum, default_value_t = Method::VertexMean)]
    method: Method,

    /// Operator joining two conditions with AND
    #[arg(long = "and", value_enum, default_value_t = And::Min)]
    and_op: And,

    /// Operator joining two conditions with OR
    #[arg(long = "or", value_enum, default_value_t = Or::Max)]
    or_op: Or,

    /// Combination of rules that conclude the same term
    #[arg(long, value_enum, default_value_t = Aggregation::Min)]
    aggregation: Aggregation,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

fn prompt(stdin: &mut impl BufRead, message: &str) -> Result<i32> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    stdin.read_line(&mut line).context("failed to read from stdin")?;

    line.trim()
        .parse()
        .with_context(|| format!("expected an integer, got {:?}", line.trim()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    let mut stdin = io::stdin().lock();
    let air_temperature = match args.air_temperature {
        Some(value) => value,
        None => prompt(&mut stdin, "Input air temperature: ")?,
    };
    let soil_moisture = match args.soil_moisture {
        Some(value) => value,
        None => prompt(&mut stdin, "Input soil moisture: ")?,
    };

    let inputs = Inputs::new(f64::from(air_temperature), f64::from(soil_moisture))?;
    let model = MamdaniInference::new(
        args.and_op.into(),
        args.or_op.into(),
        args.aggregation.into(),
        args.method.into(),
        Rules::irrigation()?,
    );

    info!(
        air_temperature,
        soil_moisture,
        method = ?args.method,
        and_op = ?args.and_op,
        or_op = ?args.or_op,
        aggregation = ?args.aggregation,
        "evaluating"
    );

    let outputs = model.eval(&inputs)?;

    println!("air_temperature_fuzzy_value: {}", outputs.air_temperature());
    println!("soil_moisture_fuzzy_value: {}", outputs.soil_moisture());
    println!("needed_water_fuzzy_value: {}", outputs.needed_water());
    println!("needed_water_crisp_value: {}", outputs.crisp());

    Ok(())
}

#[test]
fn test_args_defaults() {
    let args = Args::try_parse_from(["fuzzy-irrigation", "-a", "15", "-s", "50"]).unwrap();

    assert_eq!(args.log_level, Level::WARN);
    assert!(matches!(args.method, Method::VertexMean));
    assert_eq!(AndOp::from(args.and_op), AndOp::Min);
    assert_eq!(OrOp::from(args.or_op), OrOp::Max);
    assert_eq!(ProductionLink::from(args.aggregation), ProductionLink::Min);
}

#[test]
fn test_args_operators() {
    let args = Args::try_parse_from([
        "fuzzy-irrigation",
        "--and",
        "bounded-prod",
        "--or",
        "prob-or",
        "--aggregation",
        "max",
        "--method",
        "weighted-vertex-mean",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert_eq!(args.log_level, Level::DEBUG);
    assert_eq!(DefuzzificationOp::from(args.method), DefuzzificationOp::WeightedVertexMean);
    assert_eq!(AndOp::from(args.and_op), AndOp::BoundedProd);
    assert_eq!(OrOp::from(args.or_op), OrOp::ProbOr);
    assert_eq!(ProductionLink::from(args.aggregation), ProductionLink::Max);
}

#[test]
fn test_args_reject_unknown_log_level() {
    assert!(Args::try_parse_from(["fuzzy-irrigation", "--log-level", "verbose"]).is_err());
}
