//! Background catalogs per time period.
//!
//! Catalogs are static configuration: loaded once, never mutated. The TOML
//! form is one array of tables per period:
//!
//! ```toml
//! [[morning]]
//! id = 102
//! weight = 4
//! payload = "https://..."
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::weighted::{total_weight, WeightedCandidate};
use crate::error::{ConfigError, CoreError, Result};
use crate::period::TimePeriod;

const BLOB_BASE: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com";

/// Ordered candidate lists keyed by time period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionCatalog {
    #[serde(default)]
    pub morning: Vec<WeightedCandidate>,
    #[serde(default)]
    pub day: Vec<WeightedCandidate>,
    #[serde(default)]
    pub sunset: Vec<WeightedCandidate>,
    #[serde(default)]
    pub night: Vec<WeightedCandidate>,
}

impl SelectionCatalog {
    pub fn candidates(&self, period: TimePeriod) -> &[WeightedCandidate] {
        match period {
            TimePeriod::Morning => &self.morning,
            TimePeriod::Day => &self.day,
            TimePeriod::Sunset => &self.sunset,
            TimePeriod::Night => &self.night,
        }
    }

    /// Every period needs at least one candidate and every weight must be positive.
    pub fn validate(&self) -> Result<()> {
        for period in TimePeriod::ALL {
            let list = self.candidates(period);
            if list.is_empty() || total_weight(list) == 0 {
                return Err(CoreError::EmptyCatalog);
            }
            if let Some(bad) = list.iter().find(|c| c.weight == 0) {
                return Err(CoreError::InvalidInput(format!(
                    "candidate {} in {period} catalog has zero weight",
                    bad.id
                )));
            }
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: SelectionCatalog = toml::from_str(content).map_err(ConfigError::from)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    /// Read and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// The catalog the site ships with.
    pub fn builtin() -> Self {
        let c = |id: u32, weight: u32, file: &str| {
            WeightedCandidate::new(id, weight, format!("{BLOB_BASE}/{file}"))
        };

        Self {
            // Dew, training track, stables and aerial shots at sunrise.
            morning: vec![
                c(102, 4, "ting8921_photograph_of_morning_dew_fog_of_racehorse_luxury_tr_c0efa08e-2c5d-4153-aae6-e9654ca03214_1-1Zl6PJ8u8SIRztcP22uhpMNKeT3sbE.png"),
                c(207, 4, "ting8921_photograph_of_sunrise_orangish_of_racehorse_stable_t_9ed43d1b-12aa-4662-a645-7f33e66ce611_0-FtrFMf84CREVAxlByFBW6ey3VYT4en.png"),
                c(208, 3, "ting8921_photograph_of_view_of_elevated_luxury_racehorse_stab_8db2d894-b8a8-4c92-bf24-2edfaa98cd14_3-3wml4QsWmBHBsgb6qJUp4T2qYpFtSw.png"),
                c(205, 4, "ting8921_photograph_of_aerial_view_at_sunrise_orangish_from_o_ada9428e-03fe-428b-b14b-67059c9ed909_1-XGMwyKE8ISbywvCiGmETl3ehgDFFlt.png"),
            ],
            day: vec![
                c(1, 3, "ting8921_photograph_of_aerial_view_from_plane_window_of_raceh_6a46b45d-e56a-42ed-90ce-f8d452722ee9_2-ZJhTou5KopylyYm9XaYXjjrcaxC5xd.png"),
                c(3, 3, "ting8921_photograph_of_aerial_view_from_plane_window_of_raceh_5c59adaa-9e87-4c1b-8a07-2520c916e376_1-4uhCb5JxGTogJSElsaEuolSmcEY613.png"),
                c(101, 4, "ting8921_photograph_of_view_of_racehorse_track_at_luxury_race_24861c28-87e7-44fb-8338-aae5965244f9_2-WS8OJeRLTpj4BZQfnWhjUl49IlAUUd.png"),
                c(103, 3, "ting8921_photograph_of_view_of_racehorse_training_track_at_lu_20f4bd00-484c-4ab5-830f-734309c8e031_0-4FownmHPRofcvGV10c5M6Lz6rQ9TJC.png"),
                c(104, 3, "ting8921_photograph_of_view_of_elevated_luxury_racehorse_stab_00b608c4-29d4-4880-ad04-f0d5f7e5b300_1-igxux7xeWeaESjZw1tE8C4fKCqugVA.png"),
            ],
            sunset: vec![
                c(7, 4, "ting8921_photograph_of_aerial_view_at_sunset_orangish_from_of_13f02e30-e278-49be-8190-0ffb8d79d50f_3-1Ofb7IypLIkqvJ88LPMHW1SGYdbW7m.png"),
                c(201, 3, "ting8921_photograph_of_elevated_view_of_infield_racetrack_lou_8776d318-c28c-4e8a-9e7f-4b7960bb9e99_3-KmTMn8LS9wgYVsZV6taetZFBVyRlNh.png"),
                c(203, 3, "ting8921_photograph_of_elevated_view_of_infield_racetrack_lou_10c3a8e6-01b2-4474-92dc-d9e4cdc0eac1_3-wIcjCwDmzUseQ2yfKUPSIK9twgqkWw.png"),
                c(204, 3, "ting8921_photograph_of_elevated_view_of_infield_racetrack_lou_10c3a8e6-01b2-4474-92dc-d9e4cdc0eac1_1-byK9n09vj85gO1qCHYLt76QPsPcTEf.png"),
                c(206, 3, "ting8921_photograph_of_elevated_view_of_infield_racetrack_lou_994dff46-afd8-47a2-8668-d981a6386300_0-EsNsxNpqAHehA3Q2ByqOly8Fw1s3CR.png"),
            ],
            night: vec![
                c(4, 5, "ting8921_photograph_of_aerial_view_at_night_from_plane_window_99702386-064b-4c15-895f-4cde59a59f56_1-ny22DM1Mel4OXwUcofpiZZZKeiyEco.png"),
                c(5, 5, "ting8921_photograph_of_aerial_view_from_plane_window_of_raceh_2e81e26e-7ed7-427a-8f4a-bd9eb5fbfc25_1-uzmppyzehP7RyDqiw7Jtl26QqCXQfM.png"),
                c(6, 5, "ting8921_photograph_of_aerial_view_at_night_from_plane_window_e6be4959-31ba-42c9-8a48-ddae27308dbc_0-XFkiHVxVWZr2apTK11zSm435mnrmhW.png"),
                c(202, 4, "ting8921_photograph_of_view_of_racehorse_training_track_at_lu_d477d395-7092-4cdb-87f6-3230c33ed754_1-AwATtyjYwX1kTo8KlfLwXgf8KCkTym.png"),
            ],
        }
    }
}
