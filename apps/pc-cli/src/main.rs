use clap::{Parser, Subcommand};
use pc_config::{ConfigError, PhaseChangeProperties};
use pc_mesh::{FvMesh, MeshError, PolyMesh, ScalarField, SerialReduction, fvc};
use pc_model::{
    Channel, ChannelSpread, FlowFields, PhaseChangeError, PhaseChangeModel, PhaseChangeRegistry,
    SourcePair,
};
use pc_thermo::SaturationRegistry;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] PhaseChangeError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pc-cli")]
#[command(about = "Phase-change source terms for two-phase flow", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a properties file, then construct the model
    Validate {
        /// Path to the phaseChangeProperties YAML file
        props_path: PathBuf,
    },
    /// List registered saturation and phase-change models
    Models,
    /// Run one correction on a 1-D liquid/vapor column
    Column {
        /// Path to the phaseChangeProperties YAML file
        props_path: PathBuf,
        /// Number of cells
        #[arg(long, default_value_t = 50)]
        cells: usize,
        /// Column length [m]
        #[arg(long, default_value_t = 1.0)]
        length: f64,
        /// Interface position [m]; liquid below, vapor above
        #[arg(long, default_value_t = 0.5)]
        interface: f64,
        /// Temperature rise over the column length [K]
        #[arg(long, default_value_t = 5.0)]
        superheat: f64,
        /// Emit a JSON document instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { props_path } => cmd_validate(&props_path),
        Commands::Models => cmd_models(),
        Commands::Column {
            props_path,
            cells,
            length,
            interface,
            superheat,
            json,
        } => cmd_column(
            &props_path,
            ColumnSetup {
                cells,
                length,
                interface,
                superheat,
            },
            json,
        ),
    }
}

fn cmd_validate(props_path: &Path) -> CliResult<()> {
    println!("Validating properties: {}", props_path.display());
    let props = pc_config::load_yaml(props_path)?;
    let model = PhaseChangeModel::new(&props, 1)?;
    println!("✓ Properties are valid");
    println!("  Saturation model:   {}", model.saturation().name());
    println!("  Phase change model: {}", model.closure().name());
    println!("  Coefficients:       {}", model.closure().describe());
    println!(
        "  Condensation: {}, evaporation: {}, Hardt-Wondra: {}",
        model.switches().condensation,
        model.switches().evaporation,
        model.spreading_enabled()
    );
    Ok(())
}

fn cmd_models() -> CliResult<()> {
    println!("Saturation models:");
    for name in SaturationRegistry::with_builtin().names() {
        println!("  {name}");
    }
    println!("Phase change models:");
    for name in PhaseChangeRegistry::with_builtin().names() {
        println!("  {name}");
    }
    Ok(())
}

struct ColumnSetup {
    cells: usize,
    length: f64,
    interface: f64,
    superheat: f64,
}

#[derive(Serialize)]
struct SourceIntegrals {
    sp: f64,
    su: f64,
}

#[derive(Serialize)]
struct SpreadSummary {
    channel: &'static str,
    reference: f64,
    psi_integral: f64,
    liquid_integral: f64,
    vapor_integral: f64,
    nl: f64,
    nv: f64,
    iterations: usize,
}

#[derive(Serialize)]
struct ColumnSummary {
    saturation_model: String,
    phase_change_model: String,
    cells: usize,
    condensation: f64,
    evaporation: f64,
    interfacial_condensation: f64,
    interfacial_evaporation: f64,
    alpha_source: SourceIntegrals,
    p_source: SourceIntegrals,
    t_source: SourceIntegrals,
    spread_normalization: Option<f64>,
    spread: Vec<SpreadSummary>,
}

fn cmd_column(props_path: &Path, setup: ColumnSetup, json: bool) -> CliResult<()> {
    if setup.cells == 0 || !(setup.length > 0.0) {
        return Err(CliError::InvalidArg(
            "column needs at least one cell and a positive length".to_string(),
        ));
    }
    let props = pc_config::load_yaml(props_path)?;
    let summary = run_column(&props, &setup)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "✓ {} / {} on {} cells",
        summary.phase_change_model, summary.saturation_model, summary.cells
    );
    println!("  Condensation [kg/s]:  {:.6e}", summary.condensation);
    println!("  Evaporation  [kg/s]:  {:.6e}", summary.evaporation);
    println!(
        "  Interfacial jc, je:   {:.6e}, {:.6e}",
        summary.interfacial_condensation, summary.interfacial_evaporation
    );
    for (label, src) in [
        ("alpha", &summary.alpha_source),
        ("p", &summary.p_source),
        ("T", &summary.t_source),
    ] {
        println!("  {label:<5} source:  Sp = {:.6e}, Su = {:.6e}", src.sp, src.su);
    }
    match summary.spread_normalization {
        Some(n) => {
            println!("  Hardt-Wondra N = {n:.6}");
            for s in &summary.spread {
                println!(
                    "    {:<12} reference = {:.6e}, liquid = {:.6e}, vapor = {:.6e}, Nl = {:.6}, Nv = {:.6}, {} iterations",
                    s.channel, s.reference, s.liquid_integral, s.vapor_integral, s.nl, s.nv, s.iterations
                );
            }
        }
        None => println!("  Hardt-Wondra spreading off"),
    }
    Ok(())
}

fn run_column(props: &PhaseChangeProperties, setup: &ColumnSetup) -> CliResult<ColumnSummary> {
    let mesh = PolyMesh::line(setup.cells, setup.length)?;
    let mut model = PhaseChangeModel::new(props, setup.cells)?;
    let t_sat = model.t_sat_global().value;
    let p_sat = model.p_sat().value;

    let x: Vec<f64> = (0..setup.cells).map(|c| mesh.cell_center(c)[0]).collect();
    let alpha = ScalarField::new(
        "alpha.liquid",
        x.iter()
            .map(|&x| if x < setup.interface { 1.0 } else { 0.0 })
            .collect(),
    );
    let t = ScalarField::new(
        "T",
        x.iter()
            .map(|&x| t_sat + setup.superheat * (x - setup.interface) / setup.length)
            .collect(),
    );
    let p = ScalarField::uniform("p", setup.cells, p_sat);

    info!(cells = setup.cells, interface = setup.interface, "Running column correction");
    model.correct(&mesh, &SerialReduction, &FlowFields::new(&alpha, &p, &t))?;

    let integrate = |field: &ScalarField| fvc::domain_integrate(&mesh, &SerialReduction, field);
    let pair = |pair: &SourcePair| -> CliResult<SourceIntegrals> {
        Ok(SourceIntegrals {
            sp: integrate(&pair.sp)?,
            su: integrate(&pair.su)?,
        })
    };
    let area_weighted = |j: &ScalarField| {
        ScalarField::new(
            j.name(),
            j.iter()
                .zip(model.mag_grad_alpha().iter())
                .map(|(j, g)| j * g)
                .collect(),
        )
    };

    let report = model.last_spread_report().copied();
    let spread = Channel::ALL
        .iter()
        .filter_map(|&channel| {
            report
                .as_ref()
                .and_then(|r| r.channel(channel))
                .map(|s| spread_summary(channel, s))
        })
        .collect();

    let integrals = model.last_integrals();
    Ok(ColumnSummary {
        saturation_model: model.saturation().name().to_string(),
        phase_change_model: model.closure().name().to_string(),
        cells: setup.cells,
        condensation: integrals.condensation,
        evaporation: integrals.evaporation,
        interfacial_condensation: integrate(&area_weighted(model.jc()))?,
        interfacial_evaporation: integrate(&area_weighted(model.je()))?,
        alpha_source: pair(&model.sources().alpha)?,
        p_source: pair(&model.sources().p)?,
        t_source: pair(&model.sources().t)?,
        spread_normalization: report.map(|r| r.n),
        spread,
    })
}

fn spread_summary(channel: Channel, s: &ChannelSpread) -> SpreadSummary {
    SpreadSummary {
        channel: channel.label(),
        reference: s.reference,
        psi_integral: s.psi_integral,
        liquid_integral: s.liquid_integral,
        vapor_integral: s.vapor_integral,
        nl: s.nl,
        nv: s.nv,
        iterations: s.iterations,
    }
}
