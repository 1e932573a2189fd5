/// If true, prints in console additional information.
pub const IS_VERBOSE_MODE: bool = false;
/// If true, prints out the machine selected and reward received for each turn in the game.
pub const PRINT_EACH_STEP: bool = false;
/// Represents the number of independent games to play per strategy.
pub const NUM_OF_GAMES_TO_PLAY: usize = 100;
/// Represents the number of slot machines being played in the k-armed bandit problem, it is the number k.
pub const NUM_OF_SLOT_MACHINES: usize = 10;
/// Represents the number of turns in one game.
pub const NUM_OF_TURNS_IN_A_GAME: usize = 100_000;
/// Represents the probability with which a random machine is selected instead of the
/// best known one. It reflects the probability with which the agent explores the action
/// space. The probability that the agent exploits the knowledge it has learned is
/// (1 - EPSILON). Expected bounds: 0 <= EPSILON <= 1. When EPSILON = 0, the agent always
/// takes the greedy action. When EPSILON = 1, the agent always takes a random action.
pub const EPSILON: f64 = 0.1;
/// Temperature parameter for the softmax (Gibbs/Boltzmann) selection strategy.
/// Must be positive. Small values sharpen the distribution towards the greedy choice,
/// large values flatten it towards uniform random selection.
pub const TAU: f64 = 0.5;
/// Stepsize parameter used when updating the reward estimate for the machine that was
/// just played. Comes from the incremental mean update where it stands in for 1/n.
/// It controls how much weight each newly received reward is given.
pub const ALPHA: f64 = 0.01;
/// Initial reward estimate seeded into the agent for the optimistic initial values
/// strategy. Set above any reward the machines can pay out so that every machine looks
/// worth trying until its estimate has been pulled down by experience.
pub const OPTIMISTIC_INITIAL_VALUE: f64 = 2.0;
/// If true, the game computes alpha = 1/n for each machine (n being the number of times
/// that machine was played) and passes it into the update, which corresponds to the
/// plain sample average. If false, the constant ALPHA is passed in instead.
pub const USE_SAMPLE_AVERAGE_UPDATE: bool = false;
/// Maximum number of columns polars prints when displaying result dataframes.
pub const POLARS_MAX_COLS: &str = "12";
