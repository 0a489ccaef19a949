use nalgebra::Vector3;
use uav_control::dynamics::simulate;
use uav_control::{NonlinearController, Trajectory, VehicleState};

// Climb from 1 m to 5 m and hold
fn main() {
    let controller = NonlinearController::default();
    let physical = controller.config().physical;

    let mut state = VehicleState::at_rest(Vector3::new(0.0, 0.0, -1.0));
    let trajectory = Trajectory::hold(Vector3::new(0.0, 0.0, -5.0), 0.0);

    let simulation_span = 5.0;
    let dt = 1. / 100.; // 100 Hz
    let mut current_time = 0.0;

    while current_time < simulation_span {
        let output = controller.run_control(&trajectory, current_time, &state);

        match simulate(state, &physical, output.command, (current_time, current_time + dt), 1e-6) {
            Ok(new_state) => {
                state = new_state;
                println!(
                    "{:.2} {:.3} thrust={:.3}",
                    current_time,
                    state.altitude(),
                    output.command.thrust
                );
            }
            Err(e) => {
                println!("Simulation failed: {}", e);
                break;
            }
        }

        current_time += dt;
    }
}
