/// Holds what the agent knows while playing a bank of slot machines: one reward
/// estimate per machine and the id of the machine it pulled most recently.
/// The selection and update functions only ever read this state; writing the
/// updated estimate back after a pull is the game loop's job.
#[derive(PartialEq, Debug, Clone)]
pub struct SlotMachineAgent {
    /// Number of slot machines the agent can choose between. Fixed at creation.
    nr_slots: usize,
    /// The agent's current estimate of the expected reward for each machine.
    /// Index corresponds to the machine id.
    reward_estimates: Vec<f64>,
    /// Id of the machine that was played most recently. Always < nr_slots.
    machine_id: usize,
}

impl SlotMachineAgent {
    /// Creates an agent that knows nothing yet: every estimate starts at 0.0.
    pub fn new(nr_slots: usize) -> Self {
        Self::with_initial_estimates(nr_slots, 0.0)
    }

    /// Creates an agent with every estimate seeded to the same starting value.
    /// Seeding a value above the achievable rewards is what drives the optimistic
    /// initial values strategy.
    pub fn with_initial_estimates(nr_slots: usize, initial_value: f64) -> Self {
        assert!(nr_slots > 0, "Agent must have at least one slot machine to play.");
        SlotMachineAgent {
            nr_slots,
            reward_estimates: vec![initial_value; nr_slots],
            machine_id: 0,
        }
    }

    pub fn get_nr_slots(&self) -> usize {
        self.nr_slots
    }

    pub fn get_reward_estimates(&self) -> &[f64] {
        &self.reward_estimates
    }

    /// Id of the machine played most recently.
    pub fn get_machine_id(&self) -> usize {
        self.machine_id
    }

    /// Records which machine the agent just played.
    pub fn set_machine_id(&mut self, machine_id: usize) {
        assert!(machine_id < self.nr_slots, "Machine id must be smaller than the number of slots.");
        self.machine_id = machine_id;
    }

    /// Writes an updated reward estimate back for the given machine.
    pub fn set_reward_estimate(&mut self, machine_id: usize, estimate: f64) {
        assert!(machine_id < self.nr_slots, "Machine id must be smaller than the number of slots.");
        self.reward_estimates[machine_id] = estimate;
    }
}
