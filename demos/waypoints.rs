use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;
use uav_control::dynamics::simulate;
use uav_control::{ControllerConfig, NonlinearController, Trajectory, VehicleState, Waypoint};

const CONFIG: &str = r#"
gains:
  lateral: { coupling: shared, k_p: 4.0, k_d: 3.5 }
physical:
  max_tilt: 0.6
"#;

// Fly a square at 5 m, turning to face each leg, and print the NED track
fn main() -> Result<(), uav_control::Error> {
    let config = ControllerConfig::from_yaml_str(CONFIG)?;
    let controller = NonlinearController::new(config)?;
    let physical = controller.config().physical;

    let trajectory = Trajectory::new(vec![
        Waypoint::new(0.0, Vector3::new(0.0, 0.0, -5.0), 0.0),
        Waypoint::new(5.0, Vector3::new(5.0, 0.0, -5.0), 0.0),
        Waypoint::new(10.0, Vector3::new(5.0, 5.0, -5.0), FRAC_PI_2),
        Waypoint::new(15.0, Vector3::new(0.0, 5.0, -5.0), 2.0 * FRAC_PI_2),
        Waypoint::new(20.0, Vector3::new(0.0, 0.0, -5.0), -FRAC_PI_2),
    ])?;

    let mut state = VehicleState::at_rest(Vector3::new(0.0, 0.0, -5.0));
    let dt = 1. / 100.;
    let steps = (25.0 / dt) as usize;

    for step in 0..steps {
        let current_time = step as f64 * dt;
        let output = controller.run_control(&trajectory, current_time, &state);

        if output.diagnostics.is_degenerate() {
            println!("degenerate cycle at {:.2}: {:?}", current_time, output.diagnostics);
        }

        state = simulate(state, &physical, output.command, (current_time, current_time + dt), 1e-6)?;

        println!(
            "{} {} {}",
            state.position.x, state.position.y, state.position.z
        );
    }

    Ok(())
}
