//! End-to-end soulmate search.
//!
//! User chart, target Ascendant and age window first; then a daily ephemeris
//! over the window's birth years, pre-filtered to a bounded pool; then a full
//! chart and relationship score per candidate, keeping the best. A fixed
//! mid-window date stands in when no candidate can be scored.

use crate::age::{age_range, AgeWindow};
use crate::ascendant::solve_time_for_ascendant;
use crate::error::SoulmateError;
use crate::gender::Gender;
use crate::percent::to_percent;
use crate::prefilter::prefilter;
use crate::result::CompatibilityResult;
use crate::scoring::{score_pair, PairScore};
use crate::settings::SearchSettings;
use aphrodite::chart::{BirthMoment, BirthPlace, Body, Chart};
use aphrodite::ephemeris::EphemerisPoint;
use aphrodite::provider::AstrologyProvider;
use aphrodite::zodiac::Sign;
use chrono::{Datelike, NaiveDate, Utc};

/// Month and day of the stand-in candidate.
pub const FALLBACK_MONTH: u32 = 6;
pub const FALLBACK_DAY: u32 = 15;

/// Rising sign used when the user's chart has no Ascendant.
pub const DEFAULT_TARGET_RISING: Sign = Sign::Libra;

/// Soulmate search over one provider. Not reentrant: a search borrows the
/// provider mutably for its whole run.
pub struct SoulmateSearch<P> {
    provider: P,
    settings: SearchSettings,
    reference_year: Option<i32>,
}

struct Candidate {
    chart: Chart,
    score: PairScore,
}

impl<P: AstrologyProvider> SoulmateSearch<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            settings: SearchSettings::default(),
            reference_year: None,
        }
    }

    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Pin "now" to a given year. Defaults to the current UTC year.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Age window for a user born in `user_birth_year`, against the
    /// search's reference year.
    pub fn age_window(&self, user_birth_year: i32, user_gender: Gender, target_sex: Gender) -> AgeWindow {
        age_range(self.reference_year() - user_birth_year, user_gender, target_sex)
    }

    /// Find the birth moment that scores best against `user_birth`.
    ///
    /// Only invalid input and a failed user chart are errors; every later
    /// failure is skipped or replaced by the mid-window fallback date.
    pub fn generate_soulmate(
        &mut self,
        user_birth: &BirthMoment,
        user_gender: Gender,
        target_sex: Gender,
    ) -> Result<CompatibilityResult, SoulmateError> {
        user_birth.validate()?;
        let reference_year = self.reference_year();
        let window = self.age_window(user_birth.year, user_gender, target_sex);
        let place = user_birth.place();

        let user_chart = self.provider.calculate_chart(user_birth)?;
        let target_rising = user_chart
            .ascendant()
            .map(|asc| asc.sign.opposite())
            .unwrap_or(DEFAULT_TARGET_RISING);
        log::info!(
            "soulmate search: ages {}-{}, target rising {}",
            window.min_age,
            window.max_age,
            target_rising
        );

        let (first_year, last_year) = window.birth_years(reference_year);
        let points = self.daily_ephemeris(first_year, last_year, &place);

        let user_sun = user_chart.position_of(Body::Sun).unwrap_or(0.0);
        let user_moon = user_chart.position_of(Body::Moon).unwrap_or(0.0);
        let user_modality = Sign::from_longitude(user_sun).modality();
        let ranked = prefilter(&points, user_sun, user_moon, user_modality, &self.settings);

        let mut best: Option<Candidate> = None;
        let mut evaluated = 0usize;
        let mut skipped = 0usize;
        for candidate in &ranked {
            let birth = self.candidate_birth(candidate.point.date, target_rising, &place);
            let chart = match self.provider.calculate_chart(&birth) {
                Ok(chart) => chart,
                Err(err) => {
                    log::warn!("skipping candidate {}: {err}", candidate.point.date);
                    skipped += 1;
                    continue;
                }
            };
            evaluated += 1;

            let score = score_pair(&mut self.provider, &user_chart, &chart);
            log::debug!(
                "candidate {} {:02}:{:02} pre-score {:.1} score {} ({:?})",
                candidate.point.date,
                birth.hour,
                birth.minute,
                candidate.score,
                score.total,
                score.source
            );

            if best.as_ref().map_or(true, |b| score.total > b.score.total) {
                best = Some(Candidate { chart, score });
            }
            if best.as_ref().is_some_and(|b| b.score.total >= self.settings.early_exit_score) {
                log::debug!("early exit after {evaluated} candidates");
                break;
            }
        }
        log::info!(
            "scored {evaluated} of {} candidates ({skipped} skipped)",
            ranked.len()
        );

        let best = match best {
            Some(best) => best,
            None => self.fallback_candidate(&user_chart, first_year, last_year, target_rising, &place)?,
        };

        let percent = to_percent(i64::from(best.score.total));
        log::info!(
            "soulmate born {} scores {} ({}%)",
            best.chart.birth.year,
            best.score.total,
            percent
        );
        Ok(CompatibilityResult::new(&user_chart, best.chart, best.score.total, percent, window))
    }

    fn daily_ephemeris(&mut self, first_year: i32, last_year: i32, place: &BirthPlace) -> Vec<EphemerisPoint> {
        let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(first_year, 1, 1),
            NaiveDate::from_ymd_opt(last_year, 12, 31),
        ) else {
            log::warn!("birth years {first_year}-{last_year} are not representable");
            return Vec::new();
        };

        match self.provider.generate_ephemeris(start, end, place) {
            Ok(points) => points,
            Err(err) => {
                log::warn!("ephemeris {start}..={end} unavailable: {err}");
                Vec::new()
            }
        }
    }

    fn candidate_birth(&mut self, date: NaiveDate, target_rising: Sign, place: &BirthPlace) -> BirthMoment {
        let (hour, minute) = solve_time_for_ascendant(&mut self.provider, date, target_rising, place);
        BirthMoment::on_date(date, hour, minute, place)
    }

    fn fallback_candidate(
        &mut self,
        user_chart: &Chart,
        first_year: i32,
        last_year: i32,
        target_rising: Sign,
        place: &BirthPlace,
    ) -> Result<Candidate, SoulmateError> {
        let year = (first_year + last_year).div_euclid(2);
        let date = NaiveDate::from_ymd_opt(year, FALLBACK_MONTH, FALLBACK_DAY)
            .ok_or_else(|| SoulmateError::InvalidBirthData(format!("fallback year {year}")))?;
        log::warn!("no candidate could be scored, falling back to {date}");

        let birth = self.candidate_birth(date, target_rising, place);
        let chart = match self.provider.calculate_chart(&birth) {
            Ok(chart) => chart,
            Err(err) => {
                log::warn!("fallback chart at {:02}:{:02} failed ({err}), retrying at noon", birth.hour, birth.minute);
                let noon = BirthMoment::on_date(date, 12, 0, place);
                self.provider
                    .calculate_chart(&noon)
                    .map_err(SoulmateError::Exhausted)?
            }
        };
        let score = score_pair(&mut self.provider, user_chart, &chart);
        Ok(Candidate { chart, score })
    }
}
