use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glam::DVec3;
use kurbo::Point;
use topple::{
    units, Component, ConditionGate, Curve, EdgeTrigger, LeanTrigger, Line, LineOptions, Port,
    Pose, SideBranch,
};

#[derive(Parser, Debug)]
#[command(name = "topple", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in demo scenes.
    Scenes,
    /// Lay out a scene and emit its block placements as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Scene name (see `topple scenes`).
    #[arg(long)]
    scene: String,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

const SCENES: &[(&str, &str)] = &[
    ("condition", "two triggers feeding a condition gate"),
    ("square", "a main run sprouting ten side branches"),
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Scenes => {
            for (name, blurb) in SCENES {
                println!("{name:12} {blurb}");
            }
            Ok(())
        }
        Command::Layout(args) => cmd_layout(args),
    }
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let scene = build_scene(&args.scene)?;
    let placements = scene.placements(&Pose::IDENTITY);
    let json = if args.pretty {
        serde_json::to_string_pretty(&placements)?
    } else {
        serde_json::to_string(&placements)?
    };
    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("write json '{}'", path.display()))?;
            eprintln!("wrote {} placements to {}", placements.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn build_scene(name: &str) -> anyhow::Result<Component> {
    match name {
        "condition" => Ok(condition_scene()?),
        "square" => Ok(square_scene()?),
        other => anyhow::bail!("unknown scene '{other}', try `topple scenes`"),
    }
}

fn condition_scene() -> topple::ToppleResult<Component> {
    let mut scene = Component::root();
    scene.insert("trigger1", LeanTrigger::new(Point::new(-1.0, 0.0), 0.0)?)?;
    scene.insert(
        "trigger2",
        LeanTrigger::new(Point::new(0.5, 2.0), -FRAC_PI_2)?,
    )?;
    scene.insert("gate", ConditionGate::new(Point::ZERO, 0.0)?)?;
    scene.connect_named("in1", "trigger1", "out", "gate", "inL", Some(0.1))?;
    scene.connect_named("in2", "trigger2", "out", "gate", "inU", Some(0.5))?;
    let out_start = scene.promoted("gate", "outR")?;
    scene.insert(
        "out",
        Curve::between(out_start, Port::at(1.0, 0.0, 0.0), Some(0.1))?,
    )?;
    Ok(scene)
}

fn square_scene() -> topple::ToppleResult<Component> {
    let sz = units::SZ;
    let mut scene = Component::root();
    scene.insert("trigger", EdgeTrigger::new(Point::new(-sz * 10.0, 0.0), 0.0)?)?;
    scene.insert(
        "line",
        Line::new(
            Point::new(-sz * 10.0, 0.0),
            Point::new(0.0, 0.0),
            LineOptions {
                contain: (false, false),
                ..LineOptions::default()
            },
        )?,
    )?;
    for i in 0..10 {
        let x = i as f64 * sz / units::LINE_INTERVAL_RATIO * 2.0;
        scene.insert(format!("side{i}"), SideBranch::new(Point::new(x, 0.0), 0.0)?)?;
        scene.insert(
            format!("line{i}"),
            Line::new(
                Point::new(x, sz),
                Point::new(x, sz * 10.0),
                LineOptions::default(),
            )?,
        )?;
        scene.insert(
            format!("gap{i}"),
            topple::Block::new(
                DVec3::new(x + sz / units::LINE_INTERVAL_RATIO, 0.0, sz / 2.0),
                topple::Rpy::ZERO,
            ),
        )?;
    }
    Ok(scene)
}
