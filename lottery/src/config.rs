use std::collections::HashSet;
use std::time::Duration;

use crate::draw::Draw;
use crate::error::ConfigError;

const DEFAULT_MINUTES: f64 = 0.5;

/// Largest bound the generator can draw below.
const MAX_RANGE: u32 = i32::MAX as u32;

/// Game parameters and the winning combination. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    max_main: u32,
    max_special: u32,
    winning_main: Vec<u32>,
    winning_set: HashSet<u32>,
    winning_special: u32,
}

impl GameConfig {
    /// The number of main balls drawn is the number of winning main numbers.
    pub fn new(
        max_main: u32,
        max_special: u32,
        winning_main: Vec<u32>,
        winning_special: u32,
    ) -> Result<Self, ConfigError> {
        if max_main == 0 {
            return Err(ConfigError::EmptyRange { name: "max main number" });
        }
        if max_special == 0 {
            return Err(ConfigError::EmptyRange {
                name: "max special number",
            });
        }
        for (name, value) in [
            ("max main number", max_main),
            ("max special number", max_special),
        ] {
            if value > MAX_RANGE {
                return Err(ConfigError::RangeTooLarge {
                    name,
                    value,
                    max: MAX_RANGE,
                });
            }
        }
        if winning_main.is_empty() {
            return Err(ConfigError::NoMainBalls);
        }
        if winning_main.len() > max_main as usize {
            return Err(ConfigError::BallCountExceedsPool {
                ball_count: winning_main.len(),
                max_main,
            });
        }

        let mut winning_set = HashSet::with_capacity(winning_main.len());
        for &number in &winning_main {
            if !(1..=max_main).contains(&number) {
                return Err(ConfigError::NumberOutOfRange {
                    name: "winning main number",
                    value: number,
                    max: max_main,
                });
            }
            if !winning_set.insert(number) {
                return Err(ConfigError::DuplicateWinningNumber(number));
            }
        }
        if !(1..=max_special).contains(&winning_special) {
            return Err(ConfigError::NumberOutOfRange {
                name: "winning special number",
                value: winning_special,
                max: max_special,
            });
        }

        Ok(Self {
            max_main,
            max_special,
            winning_main,
            winning_set,
            winning_special,
        })
    }

    pub fn max_main(&self) -> u32 {
        self.max_main
    }

    pub fn max_special(&self) -> u32 {
        self.max_special
    }

    pub fn main_ball_count(&self) -> usize {
        self.winning_main.len()
    }

    /// Winning main numbers in the order they were configured.
    pub fn winning_main(&self) -> &[u32] {
        &self.winning_main
    }

    pub fn winning_special(&self) -> u32 {
        self.winning_special
    }

    /// A draw wins when the special numbers match and the main numbers are the
    /// winning set in any order.
    pub fn is_win(&self, draw: &Draw) -> bool {
        draw.special == self.winning_special
            && draw.main.iter().copied().collect::<HashSet<_>>() == self.winning_set
    }
}

impl Default for GameConfig {
    /// 5 balls out of 69 plus a special ball out of 26.
    fn default() -> Self {
        Self {
            max_main: 69,
            max_special: 26,
            winning_main: vec![8, 27, 34, 4, 19],
            winning_set: [8, 27, 34, 4, 19].into_iter().collect(),
            winning_special: 10,
        }
    }
}

/// What each worker does with its slice of the seed space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Process at most `max_attempts` seeds per worker, recording every win.
    Bounded { max_attempts: u64 },
    /// Run up to `trials` trials per worker. A trial seeds the generator once
    /// and keeps drawing until it wins.
    Search { trials: u64 },
}

impl Mode {
    /// Bounded with no cap, so only the wall-clock budget ends the run.
    pub const UNBOUNDED: Mode = Mode::Bounded {
        max_attempts: u64::MAX,
    };
}

impl Default for Mode {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// How the coordinator runs the workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub workers: usize,
    pub duration: Duration,
    pub mode: Mode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            duration: Duration::from_secs_f64(DEFAULT_MINUTES * 60.0),
            mode: Mode::default(),
        }
    }
}

impl RunConfig {
    pub fn new(workers: usize, minutes: f64, mode: Mode) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(ConfigError::InvalidDuration(minutes));
        }
        Ok(Self {
            workers,
            duration: Duration::from_secs_f64(minutes * 60.0),
            mode,
        })
    }

    /// Parse positional `[workers] [minutes] [mode]`, program name excluded.
    /// Missing arguments keep their defaults.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();

        let workers = match args.next() {
            Some(arg) => parse(arg.as_ref(), "worker count")?,
            None => 1,
        };
        let minutes = match args.next() {
            Some(arg) => parse(arg.as_ref(), "minutes to run")?,
            None => DEFAULT_MINUTES,
        };
        let mode = match args.next() {
            Some(arg) => match arg.as_ref() {
                "bounded" => Mode::UNBOUNDED,
                "search" => Mode::Search { trials: u64::MAX },
                other => return Err(ConfigError::UnknownMode(other.to_string())),
            },
            None => Mode::default(),
        };

        Self::new(workers, minutes, mode)
    }
}

fn parse<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Unparsable {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(main: &[u32], special: u32) -> Draw {
        Draw {
            main: main.to_vec(),
            special,
        }
    }

    #[test]
    fn default_game_is_valid() {
        let default = GameConfig::default();
        let built = GameConfig::new(69, 26, vec![8, 27, 34, 4, 19], 10).unwrap();
        assert_eq!(default, built);
        assert_eq!(default.main_ball_count(), 5);
    }

    #[test]
    fn win_ignores_order() {
        let game = GameConfig::default();
        assert!(game.is_win(&draw(&[4, 8, 19, 27, 34], 10)));
        assert!(game.is_win(&draw(&[34, 19, 8, 4, 27], 10)));
    }

    #[test]
    fn wrong_special_or_main_is_not_a_win() {
        let game = GameConfig::default();
        assert!(!game.is_win(&draw(&[4, 8, 19, 27, 34], 11)));
        assert!(!game.is_win(&draw(&[4, 8, 19, 27, 35], 10)));
        assert!(!game.is_win(&draw(&[4, 8, 19, 27], 10)));
    }

    #[test]
    fn rejects_more_balls_than_pool() {
        assert_eq!(
            GameConfig::new(3, 2, vec![1, 2, 3, 4], 1),
            Err(ConfigError::BallCountExceedsPool {
                ball_count: 4,
                max_main: 3
            })
        );
    }

    #[test]
    fn ball_count_equal_to_pool_is_valid() {
        assert!(GameConfig::new(3, 2, vec![3, 1, 2], 1).is_ok());
    }

    #[test]
    fn repeated_drawn_number_is_not_a_win() {
        let game = GameConfig::new(4, 2, vec![3, 4], 2).unwrap();
        assert!(!game.is_win(&draw(&[3, 3], 2)));
        assert!(game.is_win(&draw(&[4, 3], 2)));
    }

    #[test]
    fn rejects_ranges_the_generator_cannot_draw() {
        assert_eq!(
            GameConfig::new(5, u32::MAX, vec![1, 2, 3, 4, 5], 1),
            Err(ConfigError::RangeTooLarge {
                name: "max special number",
                value: u32::MAX,
                max: i32::MAX as u32
            })
        );
        assert!(matches!(
            GameConfig::new(i32::MAX as u32 + 1, 2, vec![1], 1),
            Err(ConfigError::RangeTooLarge {
                name: "max main number",
                ..
            })
        ));
        assert!(GameConfig::new(5, i32::MAX as u32, vec![1, 2, 3, 4, 5], 1).is_ok());
    }

    #[test]
    fn rejects_bad_winning_numbers() {
        assert_eq!(
            GameConfig::new(10, 2, vec![1, 1], 1),
            Err(ConfigError::DuplicateWinningNumber(1))
        );
        assert!(matches!(
            GameConfig::new(10, 2, vec![0, 1], 1),
            Err(ConfigError::NumberOutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            GameConfig::new(10, 2, vec![1, 2], 3),
            Err(ConfigError::NumberOutOfRange { value: 3, .. })
        ));
        assert_eq!(
            GameConfig::new(10, 2, vec![], 1),
            Err(ConfigError::NoMainBalls)
        );
        assert!(matches!(
            GameConfig::new(10, 0, vec![1], 1),
            Err(ConfigError::EmptyRange { .. })
        ));
    }

    #[test]
    fn args_default_to_one_worker_for_half_a_minute() {
        let config = RunConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.duration, Duration::from_secs(30));
    }

    #[test]
    fn parses_all_positional_args() {
        let config = RunConfig::from_args(["4", "2.5", "search"]).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.duration, Duration::from_secs(150));
        assert_eq!(config.mode, Mode::Search { trials: u64::MAX });
    }

    #[test]
    fn rejects_bad_args() {
        assert_eq!(
            RunConfig::from_args(["four"]),
            Err(ConfigError::Unparsable {
                name: "worker count",
                value: "four".to_string()
            })
        );
        assert_eq!(RunConfig::from_args(["0"]), Err(ConfigError::NoWorkers));
        assert!(matches!(
            RunConfig::from_args(["2", "-1"]),
            Err(ConfigError::InvalidDuration(_))
        ));
        assert!(matches!(
            RunConfig::from_args(["2", "NaN"]),
            Err(ConfigError::InvalidDuration(_))
        ));
        assert_eq!(
            RunConfig::from_args(["2", "1", "forever"]),
            Err(ConfigError::UnknownMode("forever".to_string()))
        );
    }
}
