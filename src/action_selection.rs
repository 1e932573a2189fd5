use rand::Rng;

use crate::agent::SlotMachineAgent;

/// Picks a random index from a list of weights, where each index is chosen with a
/// probability proportional to its weight. The weights do not have to add up to 1,
/// automatic scaling is applied, so callers never need to normalize.
/// One uniform number is drawn in [0, total weight) and the first index whose running
/// sum reaches it is returned. Returns None when no index can be found: all weights
/// zero, or the running sum falling short of the drawn number at the end of the walk
/// due to floating point. Callers should treat None as "should not happen for valid
/// weights" and check for it.
pub fn random_index_from_selection_wheel(weights: &[f64], rng: &mut impl Rng) -> Option<usize> {
    let total_weight: f64 = weights.iter().sum();
    let random_number = rng.gen::<f64>() * total_weight;
    if total_weight <= 0.0 {
        return None;
    }
    let mut running_sum = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        running_sum += weight;
        if random_number <= running_sum {
            return Some(index);
        }
    }
    None
}

/// Returns the id of the machine with the highest reward estimate. When several
/// machines tie for the highest estimate (exact equality, deliberately no epsilon
/// tolerance) one of them is picked uniformly at random.
pub fn find_optimal_action(agent: &SlotMachineAgent, rng: &mut impl Rng) -> usize {
    let estimates = agent.get_reward_estimates();
    let highest_estimate = estimates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let optimal_actions: Vec<usize> = estimates
        .iter()
        .enumerate()
        .filter(|(_, &estimate)| estimate == highest_estimate)
        .map(|(index, _)| index)
        .collect();

    optimal_actions[rng.gen_range(0..optimal_actions.len())]
}

/// Computes the new reward estimate for the machine the agent played most recently:
/// new = old + alpha * (reward - old). Does not touch the agent; the caller writes
/// the returned value back into the estimate vector at the same machine id.
pub fn update_score(agent: &SlotMachineAgent, alpha: f64, reward: f64) -> f64 {
    let old_estimate = agent.get_reward_estimates()[agent.get_machine_id()];
    old_estimate + alpha * (reward - old_estimate)
}

/// The optimistic initial values strategy: always plays greedily. Exploration comes
/// entirely from the estimates being seeded above the achievable rewards at agent
/// creation, which the update rule then pulls down machine by machine.
pub fn optimistic(agent: &SlotMachineAgent, rng: &mut impl Rng) -> usize {
    find_optimal_action(agent, rng)
}

/// The epsilon-greedy strategy. With probability epsilon a machine is picked uniformly
/// at random over all slots (the current best machine is not excluded), otherwise the
/// machine with the highest estimate is played. The branch decision costs exactly one
/// uniform draw; the chosen branch then draws on its own.
pub fn egreedy(epsilon: f64, agent: &SlotMachineAgent, rng: &mut impl Rng) -> usize {
    if rng.gen::<f64>() < epsilon {
        return rng.gen_range(0..agent.get_nr_slots());
    }
    find_optimal_action(agent, rng)
}

/// The softmax (Gibbs/Boltzmann) strategy: samples a machine id with probability
/// exp(estimate / tau) normalized over all machines. As tau goes to 0 the choice
/// sharpens towards greedy, as tau grows it flattens towards uniform.
/// The exponentiation is done naively, without subtracting the maximum estimate
/// first, so very large estimates or a very small tau can overflow the weights.
/// tau must be positive; tau == 0 divides by zero and the result is undefined.
/// Returns None only when the selection wheel fails, i.e. every weight underflowed
/// to zero or an input was not finite.
pub fn softmax(tau: f64, agent: &SlotMachineAgent, rng: &mut impl Rng) -> Option<usize> {
    let weights: Vec<f64> = agent
        .get_reward_estimates()
        .iter()
        .map(|&estimate| (estimate / tau).exp())
        .collect();

    random_index_from_selection_wheel(&weights, rng)
}
