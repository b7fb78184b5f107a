use crate::vector::Vec2;
use log::{debug, info};
use rand::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;
use vec2_common::{BenchConfig, BenchReport};

/// Upper bound of the random integer coordinates used by the set scenarios.
const RANDOM_INT_MAX: u32 = 23_452_345;

pub const SCENARIOS: [&str; 3] = ["random_sets", "observer_chain", "ignore"];

/// Runs the micro-benchmark scenarios and collects their reports.
pub struct BenchRunner {
    /// The run configuration, including the policy every vector is built with.
    config: BenchConfig,
    /// Seeded RNG so repeated runs set the same coordinate sequence.
    rng: StdRng,
    /// Reports in the order the scenarios ran.
    reports: Vec<BenchReport>,
}

impl BenchRunner {
    pub fn new(config: BenchConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.run.seed);
        Self { config, rng, reports: Vec::new() }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn reports(&self) -> &[BenchReport] {
        &self.reports
    }

    /// Runs one scenario by name; unknown names are an error.
    pub fn run(&mut self, scenario: &str) -> anyhow::Result<&BenchReport> {
        let report = match scenario {
            "random_sets" => self.random_sets(),
            "observer_chain" => self.observer_chain(),
            "ignore" => self.ignore(),
            other => anyhow::bail!("Unknown scenario '{}'. Expected one of {:?}.", other, SCENARIOS),
        };
        info!(
            "{}: {} ops in {:.2} ms ({:.0} ops/s)",
            report.scenario, report.iterations, report.elapsed_ms, report.ops_per_sec
        );
        self.reports.push(report);
        Ok(&self.reports[self.reports.len() - 1])
    }

    pub fn run_all(&mut self) -> anyhow::Result<()> {
        for scenario in SCENARIOS {
            self.run(scenario)?;
        }
        Ok(())
    }

    fn random_coord(&mut self) -> f64 {
        self.rng.random_range(0..=RANDOM_INT_MAX) as f64
    }

    /// `set` on a vector nobody observes.
    fn random_sets(&mut self) -> BenchReport {
        let iterations = self.config.run.iterations;
        let mut v = Vec2::with_policy(0.0, 0.0, self.config.policy);

        let start = Instant::now();
        for _ in 0..iterations {
            let xy = (self.random_coord(), self.random_coord());
            v.set(xy);
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!("random_sets finished at {}", v);

        BenchReport::new("random_sets", iterations, elapsed_ms, 0)
    }

    /// `b` follows `a + 10` through an observer on `a`.
    fn observer_chain(&mut self) -> BenchReport {
        let iterations = self.config.run.iterations;
        let policy = self.config.policy;
        let mut a = Vec2::with_policy(0.0, 0.0, policy);
        let b = Rc::new(RefCell::new(Vec2::with_policy(0.0, 0.0, policy)));
        let notifications = Rc::new(Cell::new(0u64));

        let follower = Rc::clone(&b);
        let counter = Rc::clone(&notifications);
        a.change(move |v, _| {
            counter.set(counter.get() + 1);
            follower.borrow_mut().set((v.x() + 10.0, v.y() + 10.0));
        });

        let start = Instant::now();
        for _ in 0..iterations {
            let xy = (self.random_coord(), self.random_coord());
            a.set(xy);
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!("observer_chain finished with a = {}, b = {}", a, b.borrow());

        BenchReport::new("observer_chain", iterations, elapsed_ms, notifications.get())
    }

    /// Registers `observers` callbacks, then removes them newest first.
    fn ignore(&mut self) -> BenchReport {
        let count = self.config.run.observers;
        let mut v = Vec2::with_policy(0.0, 0.0, self.config.policy);
        let subscriptions: Vec<_> = (0..count).map(|_| v.change(|_, _| {})).collect();

        let start = Instant::now();
        for subscription in subscriptions.into_iter().rev() {
            v.ignore(subscription);
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!("ignore finished with {} observers left", v.observer_count());

        BenchReport::new("ignore", count as u64, elapsed_ms, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BenchConfig {
        BenchConfig::from_toml_str(
            r#"
            [run]
            iterations = 50
            seed = 7
            observers = 20

            [output]
            base_filename = "test_bench"
            save_stats = false
            "#,
        )
        .unwrap()
    }

    #[test]
    fn runs_every_scenario_in_order() {
        let mut runner = BenchRunner::new(small_config());
        runner.run_all().unwrap();
        let names: Vec<_> = runner.reports().iter().map(|r| r.scenario.as_str()).collect();
        assert_eq!(names, SCENARIOS);
    }

    #[test]
    fn observer_chain_counts_one_notification_per_set() {
        let mut runner = BenchRunner::new(small_config());
        let report = runner.run("observer_chain").unwrap();
        assert_eq!(report.iterations, 50);
        assert_eq!(report.notifications, 50);
    }

    #[test]
    fn ignore_uses_observer_count() {
        let mut runner = BenchRunner::new(small_config());
        assert_eq!(runner.run("ignore").unwrap().iterations, 20);
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let mut runner = BenchRunner::new(small_config());
        assert!(runner.run("warp_drive").is_err());
        assert!(runner.reports().is_empty());
    }
}
