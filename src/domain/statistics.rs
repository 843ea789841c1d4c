//! 分布序列的汇总统计（均值、标准差、四分位数）

use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::models::chart::SeriesStatistics;

/// 计算一组值的汇总统计，忽略 NaN 占位；没有有限值时返回 None
pub fn summarize(values: &[f64]) -> Option<SeriesStatistics> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    let count = finite.len();
    let mean = Statistics::mean(finite.iter());
    let std_dev = (count >= 2).then(|| Statistics::std_dev(finite.iter()));
    let min = Statistics::min(finite.iter());
    let max = Statistics::max(finite.iter());

    let mut data = Data::new(finite);
    let lower_quartile = OrderStatistics::lower_quartile(&mut data);
    let median = OrderStatistics::quantile(&mut data, 0.5);
    let upper_quartile = OrderStatistics::upper_quartile(&mut data);

    Some(SeriesStatistics {
        count,
        mean,
        std_dev,
        min,
        lower_quartile,
        median,
        upper_quartile,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summarize_empty_is_none() {
        assert!(summarize(&[]).is_none());
        assert!(summarize(&[f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn test_summarize_single_value_has_no_std_dev() {
        let stats = summarize(&[20.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert!(approx(stats.mean, 20.0));
        assert!(stats.std_dev.is_none());
        assert!(approx(stats.min, 20.0));
        assert!(approx(stats.max, 20.0));
        assert!(approx(stats.median, 20.0));
    }

    #[test]
    fn test_summarize_mean_and_sample_std_dev() {
        let stats = summarize(&[10.0, 30.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert!(approx(stats.mean, 20.0));
        // 样本标准差: sqrt(((10-20)^2 + (30-20)^2) / 1)
        assert!(approx(stats.std_dev.unwrap(), 200f64.sqrt()));
        assert!(approx(stats.min, 10.0));
        assert!(approx(stats.max, 30.0));
        assert!(approx(stats.median, 20.0));
    }

    #[test]
    fn test_summarize_skips_gaps() {
        let stats = summarize(&[1.0, f64::NAN, 3.0, 2.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert!(approx(stats.mean, 2.0));
        assert!(approx(stats.median, 2.0));
        assert!(stats.lower_quartile <= stats.median);
        assert!(stats.median <= stats.upper_quartile);
    }
}
