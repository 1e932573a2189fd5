mod action_selection;
mod agent;
mod constants;
mod slot_machine;
mod slot_machine_game;
mod statistics_calculator;

use statistics_calculator::SlotMachineStatistics;

fn main() {
    // Play every strategy on its own batch of games and write the comparison
    // statistics into a timestamped result file.
    let mut statistics = SlotMachineStatistics::new();
    statistics.run();
}
