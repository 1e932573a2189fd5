use std::{ path::{ Path, PathBuf }, fs::{ self, File } };

use chrono::prelude::*;
use polars::prelude::*;
use std::cmp;
use std::io::prelude::*;

use crate::constants::{ NUM_OF_SLOT_MACHINES, NUM_OF_TURNS_IN_A_GAME, POLARS_MAX_COLS };
use crate::slot_machine_game::ParallelGameRunner;

/// Set environment variables so that whole result dataframes are printed.
fn set_polars_environment_variables(num_of_games: usize) {
    let max_rows = cmp::max(num_of_games, NUM_OF_SLOT_MACHINES);
    std::env::set_var("POLARS_FMT_MAX_COLS", POLARS_MAX_COLS);
    std::env::set_var("POLARS_FMT_MAX_ROWS", max_rows.to_string());
}

/// Creates directory if it doesn't exist.
fn create_directory(directory: &str) {
    let directory_path = Path::new(directory);
    if !directory_path.is_dir() {
        match fs::create_dir(directory_path) {
            Ok(_) => println!("Directory '{}' created successfully", directory),
            Err(err) => eprintln!("Failed to create directory '{}': {}", directory, err),
        }
    }
}

fn get_timestamped_file_path(directory: &str, file_name: &str) -> PathBuf {
    let local: DateTime<Local> = Local::now();
    let datetime_str: &str = &local.format("%Y-%m-%d_%H:%M:%S").to_string();
    let file_name = format!("{}_{}.txt", file_name, datetime_str);
    PathBuf::from(directory).join(file_name)
}

/// Collects the results of a batch of slot machine games into dataframes and
/// writes them into a timestamped result file: one dataframe per game comparing
/// what the agent learned against the actual machine probabilities, and one
/// summary dataframe with a row per game.
pub struct SlotMachineStatistics<'a> {
    game_runner: ParallelGameRunner,
    for_game_df: Vec<Option<DataFrame>>,
    df: Option<DataFrame>,
    base_directory: &'a str,
    sub_directory: &'a str,
    file_path: Option<PathBuf>,
}

impl<'a> SlotMachineStatistics<'a> {
    const BASE_DIRECTORY: &'static str = "files";
    const SUB_DIRECTORY: &'static str = "files/slot_machine_results";

    /// Statistics over the full strategy comparison batch.
    pub fn new() -> Self {
        Self::from(ParallelGameRunner::strategy_comparison())
    }

    pub fn from(runner: ParallelGameRunner) -> Self {
        let n = runner.num_of_games;
        SlotMachineStatistics {
            game_runner: runner,
            for_game_df: vec![None; n],
            df: None,
            base_directory: Self::BASE_DIRECTORY,
            sub_directory: Self::SUB_DIRECTORY,
            file_path: None,
        }
    }

    /// Runs all the games, populates the per game and summary dataframes and
    /// writes everything into the result file.
    pub fn run(&mut self) {
        self.game_runner.run_all_games_in_parallel();
        self.save_per_game_df();
        self.save_summary_df_for_all_games();
        self.write_statistics();
    }

    /// Populates the dataframe for each game separately.
    fn save_per_game_df(&mut self) {
        for n in 0..self.game_runner.num_of_games {
            self.populate_dataframe_for_game(n);
        }
    }

    /// One row per game: which strategy it played, the rewards it collected and
    /// how close the learned estimates ended up to the actual probabilities.
    fn save_summary_df_for_all_games(&mut self) {
        let mut strategies = Vec::new();
        let mut means = Vec::new();
        let mut scores = Vec::new();
        let mut totals = Vec::new();

        for n in 0..self.game_runner.num_of_games {
            strategies.push(self.game_runner.games[n].strategy.label());
            means.push(self.game_runner.games[n].calculate_mean_reward());
            totals.push(self.game_runner.games[n].calculate_total_reward());
            scores.push(self.get_learning_score_for_game(n));
        }

        let df = DataFrame::new(
            vec![
                Series::new("game_number", Vec::from_iter(0..self.game_runner.num_of_games as u32)),
                Series::new("strategy", strategies),
                Series::new("mean_reward", &means),
                Series::new("learning_score", &scores),
                Series::new("total_reward", &totals)
            ]
        ).expect("Failed to create DataFrame");
        self.df = Some(df);
    }

    /// Builds the dataframe for one game: a row per machine comparing the actual
    /// win probability with the learned estimate, the pull frequency and the
    /// rewards collected. Runs the games first if they have not been played yet.
    fn populate_dataframe_for_game(&mut self, n: usize) {
        if self.game_runner.games[n].resulting_actions.is_none() {
            self.game_runner.run_all_games_in_parallel();
        }
        let game = &self.game_runner.games[n];
        let num_of_slots = game.num_of_slots;

        let mut machine_frequency = vec![0u32; num_of_slots];
        let mut machine_rewards = vec![0.0; num_of_slots];
        for (&machine_id, &reward) in game.resulting_actions
            .as_ref()
            .unwrap()
            .iter()
            .zip(game.resulting_rewards.as_ref().unwrap().iter()) {
            machine_frequency[machine_id] += 1;
            machine_rewards[machine_id] += reward;
        }

        let mut df = DataFrame::new(
            vec![
                Series::new("machine", Vec::from_iter(0..num_of_slots as u32)),
                Series::new("actual_probability", &self._get_actual_probabilities_per_game(n)),
                Series::new("learned_estimate", game.agent.get_reward_estimates()),
                Series::new("frequency", &machine_frequency),
                Series::new("total_reward", &machine_rewards)
            ]
        ).expect("Failed to create DataFrame");

        df = df
            .lazy()
            .with_column((col("total_reward") / col("frequency")).alias("mean_reward"))
            .collect()
            .unwrap();

        df = df
            .lazy()
            .with_column(
                (col("actual_probability") - col("learned_estimate")).alias("diff_actual_learned")
            )
            .collect()
            .unwrap();

        df = df
            .lazy()
            .with_column((col("actual_probability") - col("mean_reward")).alias("diff_actual_mean"))
            .collect()
            .unwrap();

        df = df.sort(["actual_probability"], true).expect("Couldn't sort the dataframe");
        self.for_game_df[n] = Some(df);
    }

    /// Helper that obtains the actual win probabilities of one game's machines,
    /// for statistical purposes only. The learned estimates converge towards
    /// these over many turns, reflecting that the agent has learned them.
    fn _get_actual_probabilities_per_game(&self, n: usize) -> Vec<f64> {
        self.game_runner.games[n].environment
            .iter()
            .map(|machine| machine._get_actual_probability())
            .collect()
    }

    /// Numerical value that represents how good the learning was: the sum of the
    /// absolute differences between actual probability and learned estimate.
    /// The closer to 0 the better.
    fn get_learning_score_for_game(&mut self, n: usize) -> f64 {
        if self.for_game_df[n].is_none() {
            self.populate_dataframe_for_game(n);
        }

        let data = self.for_game_df[n]
            .as_ref()
            .unwrap()
            .column("diff_actual_learned")
            .expect("Column not found");
        data.f64()
            .unwrap()
            .into_iter()
            .map(|value| value.unwrap_or(0.0).abs())
            .sum()
    }

    fn get_data_to_write_in_file(&mut self) -> Vec<String> {
        if self.df.is_none() {
            self.save_summary_df_for_all_games();
            return self.get_data_to_write_in_file();
        }

        let mut lines: Vec<String> = Vec::new();

        lines.push("\n### Statistics for each game separately. ###".to_string());

        for (game_number, game_df) in self.for_game_df.iter().enumerate() {
            if let Some(df) = game_df {
                lines.push(
                    format!(
                        "### Results dataframe for game {} ({}) ###",
                        game_number,
                        self.game_runner.games[game_number].strategy.label()
                    )
                );
                lines.push(format!("{:?}\n", df));
            }
        }

        lines.push("### Statistics for all the games ###".to_string());
        lines.push(
            format!(
                "Played {} games with {} slot machines and {} turns each",
                self.game_runner.num_of_games,
                NUM_OF_SLOT_MACHINES,
                NUM_OF_TURNS_IN_A_GAME
            )
        );
        lines.push(format!("{:?}", self.df.as_ref().unwrap()));
        lines
    }

    fn write_statistics(&mut self) {
        if self.df.is_none() {
            self.save_summary_df_for_all_games();
        }

        set_polars_environment_variables(self.game_runner.num_of_games);
        create_directory(self.base_directory);
        create_directory(self.sub_directory);

        self.file_path = Some(get_timestamped_file_path(self.sub_directory, "run_result"));
        let mut output = File::create(self.file_path.as_ref().unwrap()).unwrap();

        for line in self.get_data_to_write_in_file() {
            writeln!(output, "{}", line).unwrap();
        }

        println!("Statistics for all games saved in file: {:?}", self.file_path.as_ref().unwrap());
    }
}
