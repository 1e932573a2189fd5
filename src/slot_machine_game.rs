use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

use crate::action_selection::{ egreedy, optimistic, softmax, update_score };
use crate::agent::SlotMachineAgent;
use crate::constants::{
    PRINT_EACH_STEP,
    NUM_OF_SLOT_MACHINES,
    NUM_OF_TURNS_IN_A_GAME,
    NUM_OF_GAMES_TO_PLAY,
    ALPHA,
    EPSILON,
    TAU,
    OPTIMISTIC_INITIAL_VALUE,
    USE_SAMPLE_AVERAGE_UPDATE,
};
use crate::slot_machine::BernoulliSlotMachine;

/// Which action selection strategy the agent uses on every turn of a game.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum SelectionStrategy {
    /// Pure greedy selection over estimates that were seeded optimistically
    /// high when the agent was created.
    Optimistic,
    /// Explore a random machine with probability epsilon, otherwise play the
    /// machine with the highest estimate.
    EpsilonGreedy {
        epsilon: f64,
    },
    /// Sample a machine from the Boltzmann distribution over the estimates,
    /// scaled by the temperature tau.
    Softmax {
        tau: f64,
    },
}

impl SelectionStrategy {
    /// Short human readable label used in the result dataframes.
    pub fn label(&self) -> String {
        match self {
            SelectionStrategy::Optimistic => "optimistic".to_string(),
            SelectionStrategy::EpsilonGreedy { epsilon } => format!("egreedy(e={})", epsilon),
            SelectionStrategy::Softmax { tau } => format!("softmax(tau={})", tau),
        }
    }
}

/// One game of the multi-armed bandit problem: a single agent faced with a bank
/// of slot machines for a fixed number of turns. On every turn the agent picks a
/// machine with its selection strategy, pulls it, and folds the received reward
/// into its estimate for that machine. The actions taken and rewards received are
/// recorded per turn so the statistics can be computed afterwards.
#[derive(PartialEq, Debug, Clone)]
pub struct SlotMachineGame {
    /// Number of slot machines in the bank.
    pub num_of_slots: usize,
    /// Number of turns taken in one game.
    pub num_of_turns: usize,
    /// The actual machines, each with a hidden win probability the agent is
    /// trying to learn.
    pub environment: Vec<BernoulliSlotMachine>,
    /// The agent's knowledge: one reward estimate per machine plus the machine
    /// it pulled last.
    pub agent: SlotMachineAgent,
    /// The action selection strategy played in this game.
    pub strategy: SelectionStrategy,
    /// Stepsize passed into the estimate update on every turn (unless the
    /// sample average mode recomputes it as 1/n).
    alpha: f64,
    /// When true, alpha is recomputed as 1/n per machine so the estimate is the
    /// plain average of the rewards that machine has paid out.
    use_sample_average_update: bool,
    /// How many times each machine has been pulled. Drives the 1/n alpha.
    num_times_machine_played: Vec<usize>,
    /// Every game owns its own random source, so games can run in parallel
    /// without sharing generator state.
    rng: StdRng,
    /// Machine played on each turn. None until the game has been run.
    pub resulting_actions: Option<Vec<usize>>,
    /// Reward received on each turn. None until the game has been run.
    pub resulting_rewards: Option<Vec<f64>>,
}

impl SlotMachineGame {
    /// Creates a game with the configured defaults: epsilon-greedy selection and
    /// the constant stepsize update.
    pub fn new() -> Self {
        Self::with_strategy(SelectionStrategy::EpsilonGreedy { epsilon: EPSILON })
    }

    /// Creates a game playing the given strategy. The optimistic strategy gets an
    /// agent seeded with the optimistic initial estimates, every other strategy
    /// starts from zero knowledge.
    pub fn with_strategy(strategy: SelectionStrategy) -> Self {
        let mut rng = StdRng::from_entropy();
        let agent = match strategy {
            SelectionStrategy::Optimistic => {
                SlotMachineAgent::with_initial_estimates(NUM_OF_SLOT_MACHINES, OPTIMISTIC_INITIAL_VALUE)
            }
            _ => SlotMachineAgent::new(NUM_OF_SLOT_MACHINES),
        };
        SlotMachineGame {
            num_of_slots: NUM_OF_SLOT_MACHINES,
            num_of_turns: NUM_OF_TURNS_IN_A_GAME,
            environment: BernoulliSlotMachine::new_as_vector(NUM_OF_SLOT_MACHINES, &mut rng),
            agent,
            strategy,
            alpha: ALPHA,
            use_sample_average_update: USE_SAMPLE_AVERAGE_UPDATE,
            num_times_machine_played: vec![0; NUM_OF_SLOT_MACHINES],
            rng,
            resulting_actions: None,
            resulting_rewards: None,
        }
    }

    /// Same as `with_strategy`, but with a fixed seed so test runs are reproducible.
    pub fn with_strategy_and_seed(strategy: SelectionStrategy, seed: u64) -> Self {
        let mut game = Self::with_strategy(strategy);
        let mut rng = StdRng::seed_from_u64(seed);
        game.environment = BernoulliSlotMachine::new_as_vector(game.num_of_slots, &mut rng);
        game.rng = rng;
        game
    }

    /// Plays the whole game: on every turn the strategy picks a machine, the
    /// machine is pulled, and the returned estimate is written back into the
    /// agent at the machine that was played.
    pub fn run_one_game(&mut self) {
        let mut resulting_actions = vec![];
        let mut resulting_rewards = vec![];

        for turn in 0..self.num_of_turns {
            let machine_id = self.select_action();
            self.agent.set_machine_id(machine_id);

            let reward = self.environment[machine_id].pull(&mut self.rng);

            let alpha = if self.use_sample_average_update {
                self.num_times_machine_played[machine_id] += 1;
                1.0 / (self.num_times_machine_played[machine_id] as f64)
            } else {
                self.alpha
            };
            let new_estimate = update_score(&self.agent, alpha, reward);
            self.agent.set_reward_estimate(machine_id, new_estimate);

            resulting_actions.push(machine_id);
            resulting_rewards.push(reward);

            if PRINT_EACH_STEP {
                println!("\nTurn={} \t Playing machine {} \t Reward is {}", turn, machine_id, reward);
            }
        }
        self.resulting_actions = Some(resulting_actions);
        self.resulting_rewards = Some(resulting_rewards);
    }

    fn select_action(&mut self) -> usize {
        match self.strategy {
            SelectionStrategy::Optimistic => optimistic(&self.agent, &mut self.rng),
            SelectionStrategy::EpsilonGreedy { epsilon } => {
                assert!((0.0..=1.0).contains(&epsilon), "Epsilon must be in the range [0, 1].");
                egreedy(epsilon, &self.agent, &mut self.rng)
            }
            SelectionStrategy::Softmax { tau } => {
                assert!(tau > 0.0, "Temperature must be positive.");
                softmax(tau, &self.agent, &mut self.rng).expect(
                    "Selection wheel failed to pick a machine: softmax weights degenerated"
                )
            }
        }
    }

    /// Calculates the average reward received per turn. Runs the game first if
    /// it has not been played yet.
    pub fn calculate_mean_reward(&mut self) -> f64 {
        if self.resulting_rewards.is_none() {
            self.run_one_game();
        }
        let total: f64 = self.resulting_rewards.as_ref().unwrap().iter().sum();
        total / (self.num_of_turns as f64)
    }

    /// Calculates the total reward received over the whole game. Runs the game
    /// first if it has not been played yet.
    pub fn calculate_total_reward(&mut self) -> f64 {
        if self.resulting_rewards.is_none() {
            self.run_one_game();
        }
        self.resulting_rewards.as_ref().unwrap().iter().sum()
    }
}

/// Runs many independent games in parallel. Every game owns its own agent,
/// machine bank and random source, so nothing is shared between the threads.
pub struct ParallelGameRunner {
    pub num_of_games: usize,
    pub games: Vec<SlotMachineGame>,
}

impl ParallelGameRunner {
    /// A runner where every game plays the default strategy.
    pub fn new() -> Self {
        let games: Vec<SlotMachineGame> = (0..NUM_OF_GAMES_TO_PLAY)
            .map(|_| SlotMachineGame::new())
            .collect();

        ParallelGameRunner {
            num_of_games: games.len(),
            games,
        }
    }

    /// A runner that plays the configured number of games for each of the three
    /// strategies side by side, so their statistics can be compared on equal
    /// footing.
    pub fn strategy_comparison() -> Self {
        let strategies = [
            SelectionStrategy::Optimistic,
            SelectionStrategy::EpsilonGreedy { epsilon: EPSILON },
            SelectionStrategy::Softmax { tau: TAU },
        ];
        let games: Vec<SlotMachineGame> = strategies
            .iter()
            .flat_map(|&strategy| {
                (0..NUM_OF_GAMES_TO_PLAY).map(move |_| SlotMachineGame::with_strategy(strategy))
            })
            .collect();

        ParallelGameRunner {
            num_of_games: games.len(),
            games,
        }
    }

    pub fn run_all_games_in_parallel(&mut self) {
        let start_time = Instant::now();
        self.games.par_iter_mut().for_each(|game| game.run_one_game());
        println!("# Parallel run: elapsed time: {:.2?}", start_time.elapsed());
    }
}
