//! Walk an object along a three-curve spline and print its pose each step.
//!
//! ```bash
//! cargo run -p spw-walker --example follow_path
//! ```

use spw_spline::BezierSpline;
use spw_walker::{RotationAxis, RotationMode, SplineWalker, TargetRegistry};

fn main() {
    let mut spline = BezierSpline::new();
    spline.add_curve();
    spline.add_curve();

    let targets = TargetRegistry::new();
    let mut walker = SplineWalker::new(&spline);
    walker.walk_speed = 20.0; // percent of the path per second
    walker.rotation_mode = RotationMode::Velocity;
    walker.rotation_axis = RotationAxis::Y;

    // Pause for a second when entering the middle segment.
    if let Ok(descriptor) = walker.descriptor_mut(1) {
        descriptor.pause_at_curve = true;
        descriptor.pause_time = 1.0;
    }

    match walker.total_time(&spline) {
        Ok(seconds) => println!("estimated traversal time: {seconds:.1} s"),
        Err(err) => println!("no time estimate: {err}"),
    }

    walker.start_walking();
    let dt = 0.25;
    for step in 0..40 {
        if let Err(err) = walker.advance(&spline, &targets, dt) {
            eprintln!("tick {step}: {err}");
            continue;
        }
        let p = walker.world_position();
        println!(
            "t={:5.2}  pos=({:6.2}, {:6.2}, {:6.2})  heading={:7.2}°  [{:?}]",
            walker.spline_position(),
            p.x,
            p.y,
            p.z,
            walker.orientation_euler().y,
            walker.state(),
        );
    }
}
