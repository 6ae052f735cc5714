#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter replaying scripted input against a Blockyard session.

mod script;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use blockyard_core::{Catalog, Event, UniformGrid};
use blockyard_system_builder::Builder;
use blockyard_world::Scene;
use clap::Parser;

use self::{script::Script, session::Session};

type SessionBuilder = Builder<UniformGrid, Catalog, Scene>;

/// Replays a script of pointer and tool events against a placement session.
#[derive(Debug, Parser)]
#[command(name = "blockyard", version)]
struct Args {
    /// Session file describing the grid, builder settings, and catalog.
    #[arg(long)]
    session: PathBuf,
    /// Script of input steps to replay.
    #[arg(long)]
    script: PathBuf,
    /// Log rejections and tool transitions.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Blockyard command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let session = Session::load(&args.session)?;
    let script = Script::load(&args.script)?;
    log::info!(
        "replaying {} steps against {} object types",
        script.steps.len(),
        session.objects.len()
    );

    let (builder, events) = replay(&session, &script);
    for line in describe_setup(&builder) {
        log::info!("{line}");
    }
    for event in &events {
        println!("{}", describe(event));
    }
    println!(
        "{} objects occupy {} cells",
        builder.host().len(),
        builder.occupancy().len()
    );
    for (object, entity) in builder.host().iter() {
        println!("  {object} {} at {}", entity.name(), entity.position());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn replay(session: &Session, script: &Script) -> (SessionBuilder, Vec<Event>) {
    let mut builder = Builder::new(
        session.grid.map(UniformGrid::new),
        session.catalog(),
        Scene::new(),
        session.builder,
    );
    builder.spawner_mut().add_hook(|tag| {
        log::info!(
            "spawned {} of type {} at {} ({})",
            tag.object,
            tag.kind,
            tag.footprint.origin(),
            tag.footprint.size()
        );
    });

    let mut events = Vec::new();
    for step in &script.steps {
        builder.handle(step.input, step, &mut events);
    }
    (builder, events)
}

fn describe_setup(builder: &SessionBuilder) -> Vec<String> {
    let mut lines = Vec::new();
    match builder.grid() {
        Some(grid) => {
            let [x, y, z] = grid.dimensions();
            lines.push(format!(
                "grid {x}x{y}x{z}, cell length {}, origin {}",
                grid.cell_length(),
                grid.origin()
            ));
        }
        None => lines.push("no grid configured".to_owned()),
    }
    lines.extend(builder.catalog().iter().map(|descriptor| {
        format!(
            "type {} {} size {}",
            descriptor.id, descriptor.name, descriptor.size
        )
    }));
    lines
}

fn describe(event: &Event) -> String {
    match event {
        Event::ObjectPlaced { tag } => format!(
            "placed {} (type {}) at {} size {}",
            tag.object,
            tag.kind,
            tag.footprint.origin(),
            tag.footprint.size()
        ),
        Event::PlacementRejected {
            kind,
            origin: Some(origin),
            reason,
        } => format!("rejected type {kind} at {origin}: {reason}"),
        Event::PlacementRejected {
            kind,
            origin: None,
            reason,
        } => format!("rejected type {kind}: {reason}"),
        Event::ObjectRemoved { tag } => format!(
            "removed {} from {}",
            tag.object,
            tag.footprint.origin()
        ),
        Event::StrayCellCleared { cell, object } => {
            format!("cleared stray cell {cell} owned by {object}")
        }
        Event::NothingRemoved { cell: Some(cell) } => format!("nothing to remove at {cell}"),
        Event::NothingRemoved { cell: None } => "nothing to remove".to_owned(),
        Event::RemovalRejected { reason } => format!("removal rejected: {reason}"),
        Event::ToolChanged { tool } => format!("tool {tool:?}"),
        Event::SelectionChanged { id } => format!("selected type {id}"),
        Event::LineStarted { anchor } => format!("line anchored at {anchor}"),
        Event::LineCancelled { anchor } => format!("line from {anchor} cancelled"),
        Event::LineCommitted {
            anchor,
            end,
            placed,
            rejected,
        } => format!("line {anchor} -> {end}: {placed} placed, {rejected} rejected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockyard_core::Cell;

    fn sample() -> (Session, Script) {
        let session = Session::parse(include_str!("../assets/session.toml"))
            .expect("bundled session is valid");
        let script =
            Script::parse(include_str!("../assets/script.toml")).expect("bundled script is valid");
        (session, script)
    }

    #[test]
    fn sample_script_places_stacks_and_removes() {
        let (session, script) = sample();
        let (builder, events) = replay(&session, &script);

        let placed = events
            .iter()
            .filter(|event| matches!(event, Event::ObjectPlaced { .. }))
            .count();
        let removed = events
            .iter()
            .filter(|event| matches!(event, Event::ObjectRemoved { .. }))
            .count();
        assert_eq!(placed, 7, "two dragged crates, one stacked crate, four walls");
        assert_eq!(removed, 1);
        assert_eq!(builder.host().len(), 6);
        assert_eq!(builder.occupancy().len(), 18);
        assert!(
            builder.occupancy().lookup(Cell::new(1, 1, 1)).is_some(),
            "stacked crate sits on top of the first one"
        );
        assert_eq!(builder.occupancy().lookup(Cell::new(2, 0, 1)), None);
    }

    #[test]
    fn sample_replay_is_deterministic() {
        let (session, script) = sample();
        let (first, first_events) = replay(&session, &script);
        let (second, second_events) = replay(&session, &script);

        assert_eq!(first_events, second_events, "event streams diverged");
        assert_eq!(first.occupancy(), second.occupancy(), "occupancy diverged");
    }

    #[test]
    fn setup_lists_grid_and_catalog() {
        let (session, script) = sample();
        let (builder, _) = replay(&session, &script);

        let lines = describe_setup(&builder);
        assert!(lines[0].starts_with("grid 16x8x16, cell length 1,"), "got {}", lines[0]);
        assert_eq!(lines.len(), 4, "grid line plus one per object type");
        assert!(lines[3].starts_with("type 2 pillar"), "got {}", lines[3]);
    }

    #[test]
    fn rejections_are_described_with_reason() {
        let event = Event::PlacementRejected {
            kind: blockyard_core::ObjectTypeId::new(1),
            origin: Some(Cell::new(3, 0, 4)),
            reason: blockyard_core::PlacementError::OutOfBounds {
                cell: Cell::new(3, 0, 4),
            },
        };
        let text = describe(&event);
        assert!(text.starts_with("rejected type 1 at (3, 0, 4)"), "got {text}");
    }
}
