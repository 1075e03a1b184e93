use std::time::{Duration, Instant};

/// Scores and play time across the games of one run
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    pub last_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            score: 0,
            high_score: 0,
            games_played: 0,
            last_score: None,
        }
    }

    /// Refresh the clock of a running game
    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.score = 0;
        self.last_score = None;
    }

    pub fn on_fruit(&mut self, score: u32) {
        self.score = score;
        self.high_score = self.high_score.max(score);
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.score = final_score;
        self.last_score = Some(final_score);
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
