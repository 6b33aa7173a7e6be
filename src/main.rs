use clap::Parser;
use log::info;

use voxel_picross::clock::FrameClock;
use voxel_picross::layer::clue_label_name;
use voxel_picross::notify::NotificationLog;
use voxel_picross::picking::ScriptedPicker;
use voxel_picross::render_data::{layer_instances, pick_view_instances, solved_instances};
use voxel_picross::sample::{sample_source, SampleShape};
use voxel_picross::{InteractionController, PickTarget, PuzzleConfig, ViewKind};

const MISS: [f32; 2] = [-1.0, -1.0];
const TICKS: usize = 3;

/// Load a sample puzzle and play it through the interaction core.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
struct Args {
    /// Model to turn into a puzzle
    #[arg(long, value_enum, default_value_t = SampleShape::Pyramid)]
    shape: SampleShape,

    /// Edge length of the model in voxels
    #[arg(long, short = 's', default_value_t = 5)]
    size: usize,

    /// Viewport width / height, for framing
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f32,

    /// Mark every colored cell, one Z layer at a time
    #[arg(long)]
    solve: bool,

    /// Fill in the solution instead of playing
    #[arg(long, conflicts_with = "solve")]
    reveal: bool,

    /// Override the largest accepted volume extent
    #[arg(long)]
    max_dimension: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    voxel_picross::init_logging();
    let args = Args::parse();

    let mut config = PuzzleConfig::with_defaults();
    if let Some(max) = args.max_dimension {
        config.max_dimension = max;
    }
    let (digits_min, max_dimension) = (config.clue_digits_min, config.max_dimension);

    let mut controller = InteractionController::new(config, NotificationLog::new());
    controller.load_source(&sample_source(args.shape, args.size))?;

    let Some(volume) = controller.volume() else {
        return Ok(());
    };
    let [w, h, d] = volume.dimensions();
    let maxima = volume.clue_maxima();
    println!(
        "{:?}: {}x{}x{} cells, {} colors",
        args.shape,
        w,
        h,
        d,
        volume.palette().len() - 1
    );
    println!("clue margins: x {} y {} z {}", maxima.x, maxima.y, maxima.z);
    if let Some([fx, fy]) = controller.frustum_extents(args.aspect) {
        println!("frustum half extents: {:.2} x {:.2}", fx, fy);
    }
    if let Some(hidden) = controller.hidden_cells() {
        let instances = pick_view_instances(volume, hidden)?;
        let bytes: &[u8] = bytemuck::cast_slice(instances.as_slice());
        println!("pick view: {} instances, {} bytes", instances.len(), bytes.len());
    }

    if args.reveal {
        controller.show_solution();
    } else if args.solve {
        play_layers(&mut controller, digits_min, max_dimension)?;
    }

    let mut clock = FrameClock::new();
    for _ in 0..TICKS {
        controller.tick(clock.delta());
    }

    let changed = controller.notifier().changed_cells().len();
    println!("{} cell updates sent", changed);
    match controller.view_kind() {
        Some(ViewKind::Solved) => {
            if let (Some(volume), Some([tilt, spin])) =
                (controller.volume(), controller.solved_orientation())
            {
                println!(
                    "solved! {} model cells, tilt {:.3} spin {:.3}",
                    solved_instances(volume)?.len(),
                    tilt,
                    spin
                );
            }
        }
        Some(view) => {
            let solved = controller.volume().is_some_and(|v| v.is_solved());
            println!("ended in {:?} view, states match solution: {}", view, solved);
        }
        None => {}
    }
    Ok(())
}

/// Open each Z layer from the front, mark its colored cells, then leave it.
fn play_layers(
    controller: &mut InteractionController<NotificationLog>,
    digits_min: usize,
    max_dimension: usize,
) -> voxel_picross::Result<()> {
    let Some(depth) = controller.volume().map(|v| v.depth()) else {
        return Ok(());
    };
    for z in 0..depth {
        if controller.view_kind() != Some(ViewKind::Selecting) {
            break;
        }
        let Some(index) = controller.volume().map(|v| v.index(0, 0, z)).transpose()? else {
            break;
        };
        let mut picker = ScriptedPicker::new();
        picker.set_target(ViewKind::Selecting, [0.0, 0.0], PickTarget::VolumeCell(index));
        controller.pointer_down(&picker, [0.0, 0.0]);
        controller.pointer_up(&picker, [0.0, 0.0]);

        let (Some(volume), Some(solving)) = (controller.volume(), controller.solving()) else {
            break;
        };
        let layer = solving.layer.clone();
        println!("layer z={} ({}x{})", z, layer.width(), layer.height());
        for (x, clues) in layer.top_clues().iter().enumerate() {
            let labels = clues
                .iter()
                .map(|&n| clue_label_name(n, max_dimension, digits_min))
                .collect::<voxel_picross::Result<Vec<_>>>()?;
            println!("  column {}: {}", x, labels.join(" "));
        }
        for (y, clues) in layer.left_clues().iter().enumerate() {
            println!("  row {}: {:?}", y, clues);
        }
        println!("  {} layer instances", layer_instances(volume, &layer)?.len());

        let targets = (0..layer.len())
            .filter(|&i| {
                layer
                    .volume_index(i)
                    .and_then(|v| volume.color_index(v).ok())
                    .is_some_and(|c| c.is_colored())
            })
            .collect::<Vec<_>>();
        for i in targets {
            let screen = [i as f32, 0.0];
            let mut picker = ScriptedPicker::new();
            picker.set_target(ViewKind::Solving, screen, PickTarget::LayerCell(i));
            controller.pointer_down(&picker, screen);
            controller.pointer_up(&picker, screen);
        }

        let picker = ScriptedPicker::new();
        controller.pointer_down(&picker, MISS);
        controller.pointer_up(&picker, MISS);
    }
    info!("Finished scripted play in {:?} view", controller.view_kind());
    Ok(())
}
