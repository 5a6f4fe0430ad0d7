//! 进度与剩余时间估算

use std::time::{Duration, Instant};

/// 周期性进度报告
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: usize,
    interval: usize,
    started: Instant,
}

impl ProgressTracker {
    pub fn start(total: usize, interval: usize) -> Self {
        Self {
            total,
            interval: interval.max(1),
            started: Instant::now(),
        }
    }

    /// 处理完第 `done` 条后是否需要报告
    pub fn should_report(&self, done: usize) -> bool {
        done > 0 && done % self.interval == 0
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn remaining(&self, done: usize) -> Duration {
        linear_eta(self.total, done, self.elapsed())
    }
}

/// 按已用时间线性外推剩余时间
pub fn linear_eta(total: usize, done: usize, elapsed: Duration) -> Duration {
    if done == 0 || done >= total {
        return Duration::ZERO;
    }
    elapsed.mul_f64((total - done) as f64 / done as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_report_every_interval() {
        let tracker = ProgressTracker::start(1000, 100);
        assert!(!tracker.should_report(0));
        assert!(!tracker.should_report(99));
        assert!(tracker.should_report(100));
        assert!(tracker.should_report(300));
    }

    #[test]
    fn test_linear_eta() {
        assert_eq!(linear_eta(400, 100, Duration::from_secs(30)), Duration::from_secs(90));
        assert_eq!(linear_eta(100, 100, Duration::from_secs(30)), Duration::ZERO);
        assert_eq!(linear_eta(100, 0, Duration::from_secs(30)), Duration::ZERO);
    }
}
