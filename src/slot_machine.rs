use rand::distributions::{ Bernoulli, Distribution };
use rand::Rng;

use crate::constants::IS_VERBOSE_MODE;

/// A single slot machine in the bank the agent is playing. Each pull pays out
/// 1.0 (win) or 0.0 (loss) with a win probability that is fixed when the machine
/// is created and never changes. The agent does not know this probability and
/// tries to learn it from the rewards.
#[derive(PartialEq, Debug, Clone)]
pub struct BernoulliSlotMachine {
    probability: f64,
    distribution: Bernoulli,
}

impl BernoulliSlotMachine {
    /// Creates a slot machine with the given win probability.
    pub fn new(probability: f64) -> Self {
        assert!((0.0..=1.0).contains(&probability), "Probability must be in the range [0, 1].");
        if IS_VERBOSE_MODE {
            println!("# Creating slot machine with win probability: {probability} #");
        }
        BernoulliSlotMachine {
            probability,
            distribution: Bernoulli::new(probability).unwrap(),
        }
    }

    /// Creates a slot machine with a random win probability.
    pub fn new_random(rng: &mut impl Rng) -> Self {
        BernoulliSlotMachine::new(rng.gen())
    }

    /// Creates a whole bank of slot machines, each with its own random win
    /// probability, and returns them as a vector.
    pub fn new_as_vector(number_of_machines: usize, rng: &mut impl Rng) -> Vec<BernoulliSlotMachine> {
        (0..number_of_machines).map(|_| BernoulliSlotMachine::new_random(rng)).collect()
    }

    /// Pulls the leaver once. The reward is 1.0 for a win and 0.0 for a loss.
    pub fn pull(&self, rng: &mut impl Rng) -> f64 {
        match self.distribution.sample(rng) {
            true => 1.0,
            false => 0.0,
        }
    }

    /// Added ONLY for purposes of collecting statistics about the game.
    /// Since the probability is hidden from the agent, we need a way to obtain
    /// what it actually was so it can be compared to what the agent has learned.
    pub fn _get_actual_probability(&self) -> f64 {
        self.probability
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_slot_machine_with_valid_probability() {
        let machine = BernoulliSlotMachine::new(0.5);

        assert_eq!(machine._get_actual_probability(), 0.5);
    }

    #[test]
    #[should_panic(expected = "Probability must be in the range [0, 1].")]
    fn test_create_slot_machine_with_probability_greater_than_one() {
        BernoulliSlotMachine::new(1.5);
    }

    #[test]
    #[should_panic(expected = "Probability must be in the range [0, 1].")]
    fn test_create_slot_machine_with_probability_less_than_zero() {
        BernoulliSlotMachine::new(-0.5);
    }

    #[test]
    fn test_pull_always_returns_zero_when_probability_is_zero() {
        let mut rng = StdRng::seed_from_u64(42);
        let machine = BernoulliSlotMachine::new(0.0);

        for _ in 0..100 {
            let reward = machine.pull(&mut rng);
            assert_eq!(reward, 0.0, "Pull paid out a win when the probability is zero");
        }
    }

    #[test]
    fn test_pull_always_returns_one_when_probability_is_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let machine = BernoulliSlotMachine::new(1.0);

        for _ in 0..100 {
            let reward = machine.pull(&mut rng);
            assert_eq!(reward, 1.0, "Pull paid out a loss when the probability is one");
        }
    }

    #[test]
    fn test_pull_when_probability_is_half() {
        let mut rng = StdRng::seed_from_u64(42);
        let machine = BernoulliSlotMachine::new(0.5);
        let expected_range = 450..550; // 1000 pulls

        let mut win_counter = 0;
        let mut loss_counter = 0;
        for _ in 0..1000 {
            if machine.pull(&mut rng) == 1.0 {
                win_counter += 1;
            } else {
                loss_counter += 1;
            }
        }

        assert!(
            expected_range.contains(&win_counter),
            "Number of wins not within the expected range [450, 550): {}",
            win_counter
        );
        assert!(
            expected_range.contains(&loss_counter),
            "Number of losses not within the expected range [450, 550): {}",
            loss_counter
        );
    }

    #[test]
    fn test_create_random_slot_machine() {
        let mut rng = StdRng::seed_from_u64(42);

        let machine = BernoulliSlotMachine::new_random(&mut rng);

        assert!(
            (0.0..=1.0).contains(&machine._get_actual_probability()),
            "Randomly created machine has an invalid probability: {}",
            machine._get_actual_probability()
        );
    }

    #[test]
    fn test_create_vector_of_slot_machines() {
        let mut rng = StdRng::seed_from_u64(42);

        let machines = BernoulliSlotMachine::new_as_vector(10, &mut rng);

        assert_eq!(machines.is_empty(), false);
        assert_eq!(machines.len(), 10);

        let mut probabilities: Vec<f64> = machines
            .iter()
            .map(|machine| machine._get_actual_probability())
            .collect();
        probabilities.sort_by(|a, b| a.partial_cmp(b).unwrap());
        probabilities.dedup();

        assert_eq!(probabilities.len(), 10, "Slot machines do not have unique probabilities");
    }
}
