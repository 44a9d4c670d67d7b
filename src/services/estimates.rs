//! Feed estimate engine
//!
//! Computes feeding-day counts for a period (accounting for a weekly fasting
//! day) and aggregates diet quantities x population into projected
//! consumption and cost, per month and per year. The calendar arithmetic and
//! table assembly are pure functions over prefetched rows; the async methods
//! only gather inputs.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;

use crate::{
    api::estimates::{
        CategoryAnimal, DaysInfo, DietCell, FeedEstimate, FeedEstimateLine, FeedingDayInfo,
        MonthInfo, MonthlyGrandTotals, PerDayEstimate, PerDayFeedRow, SpeciesMonthlyTotals,
        YearlyEstimate, YearlyFeedRow,
    },
    error::AppResult,
    models::animal::AnimalCategory,
    models::enums::{fasting_day_name, month_name},
    repository::{diets::DailyFeedTotal, feeds::FeedItemWithUnit, Repository},
};

/// All estimate outputs are tagged with this currency
pub const CURRENCY: &str = "INR";

/// Diet quantity lookup: (feed item ID, species ID) -> per-animal daily
/// quantity
pub type DietMap = HashMap<(i32, i32), f64>;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calendar days of a month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    (next - first).num_days() as u32
}

/// Count occurrences of a weekday (taken modulo 7, 0 = Sunday) in a month
pub fn count_weekday_in_month(weekday: i32, year: i32, month: u32) -> u32 {
    let weekday = weekday.rem_euclid(7) as u32;
    (1..=days_in_month(year, month))
        .filter(|&day| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| date.weekday().num_days_from_sunday() == weekday)
                .unwrap_or(false)
        })
        .count() as u32
}

/// Feeding-day breakdown for a period. month -1 designates a fixed 30-day
/// block with no fasting-day subtraction; fasting_day -1 means no fasting
/// day.
pub fn calculate_feeding_days(fasting_day: i32, month: i32, year: i32) -> FeedingDayInfo {
    if month == -1 {
        return FeedingDayInfo {
            total_days: 30,
            feeding_days: 30,
            fasting_days: 0,
        };
    }

    let total_days = days_in_month(year, month as u32);
    let feeding_days = if fasting_day == -1 {
        total_days
    } else {
        total_days - count_weekday_in_month(fasting_day, year, month as u32)
    };

    FeedingDayInfo {
        total_days,
        feeding_days,
        fasting_days: total_days - feeding_days,
    }
}

/// Assemble the monthly estimate from per-feed-item daily totals. Rows whose
/// feed item could not be resolved (price None) are dropped without touching
/// the other lines.
fn assemble_feed_estimate(
    month: i32,
    year: i32,
    days: FeedingDayInfo,
    rows: Vec<(DailyFeedTotal, Option<i32>)>,
) -> FeedEstimate {
    let mut estimates = Vec::with_capacity(rows.len());
    let mut total_price = 0.0;

    for (total, price) in rows {
        let Some(price_per_unit) = price else {
            continue;
        };

        let total_quantity = total.total_quantity * days.feeding_days as f64;
        let item_price = total_quantity * price_per_unit as f64;

        estimates.push(FeedEstimateLine {
            id: total.feed_item_id,
            name: total.feed_item_name,
            unit: total.unit_name,
            quantity_per_day: round2(total.total_quantity),
            total_quantity: round2(total_quantity),
            price_per_unit,
            total_price: round2(item_price),
        });

        total_price += item_price;
    }

    FeedEstimate {
        month,
        year,
        total_days: days.total_days,
        feeding_days: days.feeding_days,
        fasting_days: days.fasting_days,
        estimates,
        total_price: round2(total_price),
        currency: CURRENCY.to_string(),
    }
}

/// Build the per-day cross-tab: feed items as rows, species as columns, every
/// cell per-animal quantity x head count.
fn build_per_day_estimate(
    month: i32,
    year: i32,
    fasting_day: i32,
    category: AnimalCategory,
    animals: Vec<CategoryAnimal>,
    feed_items: Vec<FeedItemWithUnit>,
    diet: &DietMap,
) -> PerDayEstimate {
    let days = calculate_feeding_days(fasting_day, month, year);
    let days_info = DaysInfo {
        total_days: days.total_days,
        feeding_days: days.feeding_days,
        fasting_days: days.fasting_days,
        fasting_day_name: fasting_day_name(fasting_day),
        month_name: month_name(month),
    };

    let mut column_totals: IndexMap<i32, f64> =
        animals.iter().map(|animal| (animal.id, 0.0)).collect();

    let mut rows = Vec::with_capacity(feed_items.len());
    for feed_item in feed_items {
        let mut diets = IndexMap::with_capacity(animals.len());
        let mut daily_total = 0.0;

        for animal in &animals {
            let per_animal = diet
                .get(&(feed_item.id, animal.id))
                .copied()
                .unwrap_or(0.0);
            let required_per_day = per_animal * animal.quantity as f64;
            daily_total += required_per_day;
            if let Some(total) = column_totals.get_mut(&animal.id) {
                *total += required_per_day;
            }
            diets.insert(
                animal.id,
                DietCell {
                    per_animal,
                    required_for_quantity: required_per_day,
                },
            );
        }

        rows.push(PerDayFeedRow {
            id: feed_item.id,
            name: feed_item.name,
            unit: feed_item.unit_name,
            diets,
            daily_total,
        });
    }

    let grand_total = rows.iter().map(|row| row.daily_total).sum();

    PerDayEstimate {
        month,
        year,
        fasting_day,
        category,
        days_info,
        animals,
        feed_items: rows,
        column_totals,
        grand_total,
    }
}

/// Build the yearly projection: per-month effective feeding days applied to
/// every (feed item, species) daily requirement, with row, column and grand
/// totals plus annual cost.
fn build_yearly_estimate(
    year: i32,
    fasting_day: i32,
    category: AnimalCategory,
    animals: Vec<CategoryAnimal>,
    feed_items: Vec<FeedItemWithUnit>,
    diet: &DietMap,
) -> YearlyEstimate {
    // Weekday values outside 0..=6 mean "no fasting day" at year level
    let fasting_active = (0..=6).contains(&fasting_day);

    let mut months_info = Vec::with_capacity(12);
    let mut total_effective_days_in_year = 0;
    for month in 1..=12u32 {
        let days = days_in_month(year, month);
        let fasting_occurrences = if fasting_active {
            count_weekday_in_month(fasting_day, year, month)
        } else {
            0
        };
        let effective_days = days.saturating_sub(fasting_occurrences);
        total_effective_days_in_year += effective_days;
        months_info.push(MonthInfo {
            month,
            month_name: month_name(month as i32),
            days_in_month: days,
            fasting_occurrences,
            effective_days,
        });
    }

    let mut species_totals: Vec<SpeciesMonthlyTotals> = animals
        .iter()
        .map(|animal| SpeciesMonthlyTotals {
            species_id: animal.id,
            name: animal.name.clone(),
            monthly_totals: vec![0.0; 12],
            year_total: 0.0,
        })
        .collect();

    let mut monthly_grand_totals = vec![0.0; 12];
    let mut yearly_grand_total = 0.0;
    let mut total_annual_cost = 0.0;

    let mut feed_items_table = Vec::with_capacity(feed_items.len());
    for feed_item in feed_items {
        // Per-day requirement is month-invariant: head counts and per-animal
        // quantities do not vary by month in this model
        let quantity_per_day: f64 = animals
            .iter()
            .map(|animal| {
                diet.get(&(feed_item.id, animal.id)).copied().unwrap_or(0.0)
                    * animal.quantity as f64
            })
            .sum();

        let mut monthly_totals = vec![0.0; 12];
        let mut year_total = 0.0;

        for (month_idx, info) in months_info.iter().enumerate() {
            let effective_days = info.effective_days as f64;
            let mut month_total = 0.0;

            for (animal, totals) in animals.iter().zip(species_totals.iter_mut()) {
                let per_day = diet.get(&(feed_item.id, animal.id)).copied().unwrap_or(0.0)
                    * animal.quantity as f64;
                let required_for_month = per_day * effective_days;

                month_total += required_for_month;
                totals.monthly_totals[month_idx] += required_for_month;
                totals.year_total += required_for_month;
            }

            monthly_totals[month_idx] = month_total;
            monthly_grand_totals[month_idx] += month_total;
            year_total += month_total;
        }

        let rate_per_kg = feed_item.estimated_price;
        let annual_cost = if rate_per_kg > 0 {
            year_total * rate_per_kg as f64
        } else {
            0.0
        };

        yearly_grand_total += year_total;
        total_annual_cost += annual_cost;

        feed_items_table.push(YearlyFeedRow {
            id: feed_item.id,
            name: feed_item.name,
            unit: feed_item.unit_name,
            quantity_per_day,
            monthly_totals,
            year_total,
            rate_per_kg,
            annual_cost,
        });
    }

    let grand_year_total = monthly_grand_totals.iter().sum();

    YearlyEstimate {
        year,
        fasting_day,
        fasting_day_name: fasting_day_name(fasting_day),
        category,
        animals,
        months_info,
        total_effective_days_in_year,
        feed_items_table,
        monthly_grand_totals: MonthlyGrandTotals {
            months: monthly_grand_totals,
            year_total: grand_year_total,
        },
        animals_monthly_totals: species_totals,
        yearly_grand_total,
        total_annual_cost,
    }
}

#[derive(Clone)]
pub struct EstimateService {
    repository: Repository,
}

impl EstimateService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Monthly feed consumption estimate across the whole diet table
    pub async fn generate_feed_estimates(
        &self,
        fasting_day: i32,
        month: i32,
        year: i32,
    ) -> AppResult<FeedEstimate> {
        let days = calculate_feeding_days(fasting_day, month, year);
        let totals = self.repository.diets.daily_feed_consumption().await?;

        let mut rows = Vec::with_capacity(totals.len());
        for total in totals {
            let price = self
                .repository
                .feeds
                .find_item(total.feed_item_id)
                .await?
                .map(|item| item.estimated_price);
            rows.push((total, price));
        }

        Ok(assemble_feed_estimate(month, year, days, rows))
    }

    /// Per-day feed requirement table for one category
    pub async fn per_day_estimate(
        &self,
        month: i32,
        year: i32,
        fasting_day: i32,
        category_id: i32,
    ) -> AppResult<PerDayEstimate> {
        let category = self.repository.animals.get_category(category_id).await?;
        let animals = self.category_animals(category_id).await?;
        let feed_items = self
            .repository
            .feeds
            .list_catalog_for_category(category_id)
            .await?;
        let diet = self.diet_map(category_id).await?;

        Ok(build_per_day_estimate(
            month,
            year,
            fasting_day,
            category,
            animals,
            feed_items,
            &diet,
        ))
    }

    /// Yearly feed requirement and cost projection for one category
    pub async fn yearly_estimate(
        &self,
        year: i32,
        fasting_day: i32,
        category_id: i32,
    ) -> AppResult<YearlyEstimate> {
        let category = self.repository.animals.get_category(category_id).await?;
        let animals = self.category_animals(category_id).await?;
        let feed_items = self
            .repository
            .feeds
            .list_catalog_for_category(category_id)
            .await?;
        let diet = self.diet_map(category_id).await?;

        Ok(build_yearly_estimate(
            year,
            fasting_day,
            category,
            animals,
            feed_items,
            &diet,
        ))
    }

    /// Active species of the category with their feed-eligible head counts
    /// (latest population closing; 0 when no snapshot exists)
    async fn category_animals(&self, category_id: i32) -> AppResult<Vec<CategoryAnimal>> {
        let species = self
            .repository
            .animals
            .list_species_by_category(category_id, true)
            .await?;

        let mut animals = Vec::with_capacity(species.len());
        for sp in species {
            let quantity = self
                .repository
                .populations
                .latest_by_species(sp.id)
                .await?
                .map(|record| record.closing.feed_eligible())
                .unwrap_or(0);
            animals.push(CategoryAnimal {
                id: sp.id,
                name: sp.common_name,
                quantity,
            });
        }
        Ok(animals)
    }

    /// One-pass diet lookup for the category's cross-tabs
    async fn diet_map(&self, category_id: i32) -> AppResult<DietMap> {
        let rows = self
            .repository
            .diets
            .quantities_by_category(category_id)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| ((row.feed_item_id, row.species_id), row.quantity))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(id: i32, name: &str, quantity: f64) -> DailyFeedTotal {
        DailyFeedTotal {
            feed_item_id: id,
            feed_item_name: name.to_string(),
            unit_name: "kg".to_string(),
            total_quantity: quantity,
        }
    }

    fn category() -> AnimalCategory {
        AnimalCategory {
            id: 1,
            name: "Carnivores".to_string(),
            fasting_day: Some(0),
        }
    }

    fn animal(id: i32, name: &str, quantity: i32) -> CategoryAnimal {
        CategoryAnimal {
            id,
            name: name.to_string(),
            quantity,
        }
    }

    fn feed(id: i32, name: &str, price: i32) -> FeedItemWithUnit {
        FeedItemWithUnit {
            id,
            name: name.to_string(),
            unit_name: "kg".to_string(),
            estimated_price: price,
        }
    }

    #[test]
    fn test_synthetic_period_ignores_fasting_day() {
        for fasting_day in [-1, 0, 3, 6] {
            let days = calculate_feeding_days(fasting_day, -1, 2024);
            assert_eq!(days.total_days, 30);
            assert_eq!(days.feeding_days, 30);
            assert_eq!(days.fasting_days, 0);
        }
    }

    #[test]
    fn test_no_fasting_day_feeds_every_day() {
        let days = calculate_feeding_days(-1, 7, 2025);
        assert_eq!(days.total_days, 31);
        assert_eq!(days.feeding_days, 31);
        assert_eq!(days.fasting_days, 0);
    }

    #[test]
    fn test_feb_2024_sunday_fasting() {
        // Leap year February: Sundays fall on 4, 11, 18, 25
        let days = calculate_feeding_days(0, 2, 2024);
        assert_eq!(days.total_days, 29);
        assert_eq!(days.fasting_days, 4);
        assert_eq!(days.feeding_days, 25);
    }

    #[test]
    fn test_feeding_fasting_partition() {
        for month in 1..=12 {
            for weekday in 0..7 {
                let days = calculate_feeding_days(weekday, month, 2025);
                assert_eq!(days.feeding_days + days.fasting_days, days.total_days);
                assert_eq!(
                    days.fasting_days,
                    count_weekday_in_month(weekday, 2025, month as u32)
                );
            }
        }
    }

    #[test]
    fn test_count_weekday_known_months() {
        // January 2024 starts on a Monday and has 31 days
        assert_eq!(count_weekday_in_month(1, 2024, 1), 5);
        assert_eq!(count_weekday_in_month(4, 2024, 1), 4);
        // Weekday index wraps modulo 7
        assert_eq!(
            count_weekday_in_month(7, 2024, 1),
            count_weekday_in_month(0, 2024, 1)
        );
        assert_eq!(
            count_weekday_in_month(-6, 2024, 1),
            count_weekday_in_month(1, 2024, 1)
        );
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn test_monthly_estimate_pricing() {
        let days = calculate_feeding_days(-1, 4, 2025);
        let estimate = assemble_feed_estimate(
            4,
            2025,
            days,
            vec![(total(1, "Hay", 26.0), Some(12)), (total(2, "Meat", 4.5), Some(300))],
        );

        assert_eq!(estimate.feeding_days, 30);
        assert_eq!(estimate.currency, "INR");
        assert_eq!(estimate.estimates.len(), 2);

        let hay = &estimate.estimates[0];
        assert_eq!(hay.quantity_per_day, 26.0);
        assert_eq!(hay.total_quantity, 780.0);
        assert_eq!(hay.total_price, 9360.0);

        let meat = &estimate.estimates[1];
        assert_eq!(meat.total_quantity, 135.0);
        assert_eq!(meat.total_price, 40500.0);

        // Reported total matches the sum of the lines within rounding
        let line_sum: f64 = estimate.estimates.iter().map(|l| l.total_price).sum();
        assert!((estimate.total_price - line_sum).abs() < 0.01);
    }

    #[test]
    fn test_monthly_estimate_skips_dangling_feed_items() {
        let days = calculate_feeding_days(-1, 4, 2025);
        let estimate = assemble_feed_estimate(
            4,
            2025,
            days,
            vec![
                (total(1, "Hay", 10.0), Some(5)),
                (total(99, "Orphaned", 1000.0), None),
            ],
        );

        assert_eq!(estimate.estimates.len(), 1);
        assert_eq!(estimate.estimates[0].id, 1);
        assert_eq!(estimate.total_price, 10.0 * 30.0 * 5.0);
    }

    #[test]
    fn test_per_day_cross_tab() {
        // Lion diet: 2.0 meat/animal; Tiger diet: 1.5 meat + 0.5 bones
        let mut diet = DietMap::new();
        diet.insert((1, 10), 2.0);
        diet.insert((1, 20), 1.5);
        diet.insert((2, 20), 0.5);

        let estimate = build_per_day_estimate(
            3,
            2025,
            -1,
            category(),
            vec![animal(10, "Lion", 10), animal(20, "Tiger", 4)],
            vec![feed(1, "Meat", 300), feed(2, "Bones", 50)],
            &diet,
        );

        let meat = &estimate.feed_items[0];
        assert_eq!(meat.diets[&10].per_animal, 2.0);
        assert_eq!(meat.diets[&10].required_for_quantity, 20.0);
        assert_eq!(meat.diets[&20].required_for_quantity, 6.0);
        assert_eq!(meat.daily_total, 26.0);

        // No diet row for (Bones, Lion): contributes zero
        let bones = &estimate.feed_items[1];
        assert_eq!(bones.diets[&10].per_animal, 0.0);
        assert_eq!(bones.daily_total, 2.0);

        assert_eq!(estimate.column_totals[&10], 20.0);
        assert_eq!(estimate.column_totals[&20], 8.0);
        assert_eq!(estimate.grand_total, 28.0);
        assert_eq!(estimate.days_info.month_name, "Mar");
        assert_eq!(estimate.days_info.fasting_day_name, "No fasting day");
    }

    #[test]
    fn test_yearly_totals_are_consistent() {
        let mut diet = DietMap::new();
        diet.insert((1, 10), 2.0);
        diet.insert((1, 20), 1.5);
        diet.insert((2, 20), 0.5);

        let estimate = build_yearly_estimate(
            2025,
            1,
            category(),
            vec![animal(10, "Lion", 10), animal(20, "Tiger", 4)],
            vec![feed(1, "Meat", 300), feed(2, "Bones", 50)],
            &diet,
        );

        assert_eq!(estimate.months_info.len(), 12);
        assert_eq!(estimate.fasting_day_name, "Monday");

        let effective_sum: u32 = estimate
            .months_info
            .iter()
            .map(|info| info.effective_days)
            .sum();
        assert_eq!(estimate.total_effective_days_in_year, effective_sum);

        for info in &estimate.months_info {
            assert_eq!(
                info.effective_days + info.fasting_occurrences,
                info.days_in_month
            );
        }

        for row in &estimate.feed_items_table {
            let monthly_sum: f64 = row.monthly_totals.iter().sum();
            assert!((monthly_sum - row.year_total).abs() < 1e-6);
            assert!((row.annual_cost - row.year_total * row.rate_per_kg as f64).abs() < 1e-6);
        }

        let meat = &estimate.feed_items_table[0];
        assert_eq!(meat.quantity_per_day, 26.0);
        assert!(
            (meat.year_total - 26.0 * estimate.total_effective_days_in_year as f64).abs() < 1e-6
        );

        for species in &estimate.animals_monthly_totals {
            let monthly_sum: f64 = species.monthly_totals.iter().sum();
            assert!((monthly_sum - species.year_total).abs() < 1e-6);
        }

        let grand_sum: f64 = estimate.monthly_grand_totals.months.iter().sum();
        assert!((grand_sum - estimate.monthly_grand_totals.year_total).abs() < 1e-6);
        assert!((grand_sum - estimate.yearly_grand_total).abs() < 1e-6);

        let cost_sum: f64 = estimate
            .feed_items_table
            .iter()
            .map(|row| row.annual_cost)
            .sum();
        assert!((cost_sum - estimate.total_annual_cost).abs() < 1e-6);
    }

    #[test]
    fn test_yearly_out_of_range_fasting_day_feeds_all_year() {
        let diet = DietMap::new();
        let estimate = build_yearly_estimate(
            2025,
            9,
            category(),
            vec![animal(10, "Lion", 2)],
            vec![feed(1, "Meat", 300)],
            &diet,
        );
        // 2025 is not a leap year
        assert_eq!(estimate.total_effective_days_in_year, 365);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(26.666_666), 26.67);
        assert_eq!(round2(2.674), 2.67);
        assert_eq!(round2(2.676), 2.68);
        assert_eq!(round2(10.0), 10.0);
    }
}
