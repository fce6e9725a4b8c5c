use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, Command};
use stem_mesh::{
    Grow, Growth, MeshData, Plant, PlantGenerator, SegmentKind, SpeciesParameters,
    BLADE_MATERIAL, STEM_MATERIAL,
};

const DEFAULT_SPECIES: &str = "assets/species.toml";
const DEFAULT_GROWTH: &str = "4.5";

fn cli() -> Command {
    Command::new("stem-mesh")
        .about("Grows a plant from a species description and summarizes its mesh")
        .arg(
            Arg::new("species")
                .value_name("SPECIES")
                .help("TOML file describing the species")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_SPECIES),
        )
        .arg(
            Arg::new("growth")
                .value_name("GROWTH")
                .help("Development of the plant, one stem segment per unit")
                .value_parser(value_parser!(f32))
                .allow_negative_numbers(true)
                .default_value(DEFAULT_GROWTH),
        )
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = cli().get_matches();
    let path = matches
        .get_one::<PathBuf>("species")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SPECIES));
    let growth = matches.get_one::<f32>("growth").copied().unwrap_or_default();

    let species = match SpeciesParameters::load(&path) {
        Ok(species) => species,
        Err(e) => {
            log::error!("{}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let clamped = species.clamped();
    if clamped != species {
        log::warn!("{}: some values were out of range and have been clamped", path.display());
    }

    let mut generator = PlantGenerator::new();
    let plant = Growth(growth).grow::<Plant>(&species, &mut generator);

    for segment in &plant.segments {
        let kind = match segment.kind {
            SegmentKind::Tube => "tube",
            SegmentKind::Cone => "cone",
        };
        println!(
            "segment {:>3} {kind}  growth {:>6.3}  length {:.3}  radius {:.3}  leaves {}",
            segment.index,
            segment.remaining_growth,
            segment.length,
            segment.base_radius,
            segment.leaves,
        );
    }

    let mesh = plant.grow::<MeshData>(&(), &mut ());
    println!(
        "{} vertices, {} stem triangles, {} blade triangles",
        mesh.vertex_count(),
        mesh.triangle_count(STEM_MATERIAL),
        mesh.triangle_count(BLADE_MATERIAL),
    );
    ExitCode::SUCCESS
}
