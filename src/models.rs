use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MEAL_COUNT: usize = 4;
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrainingType {
    #[default]
    #[serde(rename = "")]
    Unset,
    Rest,
    Weight,
    Cardio,
    Hiit,
    Bodyweight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BathroomCount {
    #[serde(rename = "0")]
    Zero,
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreeOrMore,
}

/// Self-reported ratings, 1 is bad and 5 is good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biofeedback {
    pub sleep: u8,
    pub energy: u8,
    pub stress: u8,
    pub hunger: u8,
    pub digestion: u8,
    pub bloating: u8,
}

impl Default for Biofeedback {
    fn default() -> Self {
        Self {
            sleep: 5,
            energy: 5,
            stress: 5,
            hunger: 5,
            digestion: 5,
            bloating: 5,
        }
    }
}

impl Biofeedback {
    pub fn ratings(&self) -> [(&'static str, u8); 6] {
        [
            ("sleep", self.sleep),
            ("energy", self.energy),
            ("stress", self.stress),
            ("hunger", self.hunger),
            ("digestion", self.digestion),
            ("bloating", self.bloating),
        ]
    }
}

/// Everything logged for one calendar date.
///
/// Missing fields in stored data fall back to their defaults, so records
/// written before `mealOptions` existed still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyRecord {
    pub training_type: TrainingType,
    pub weight: String,
    pub steps: String,
    pub water_intake: String,
    pub bathroom: BathroomCount,
    pub meals: [String; MEAL_COUNT],
    pub meal_options: [u8; MEAL_COUNT],
    pub biofeedback: Biofeedback,
    pub supplements: String,
    pub notes: String,
}

impl Default for DailyRecord {
    fn default() -> Self {
        Self {
            training_type: TrainingType::Unset,
            weight: String::new(),
            steps: String::new(),
            water_intake: String::new(),
            bathroom: BathroomCount::One,
            meals: Default::default(),
            meal_options: [1; MEAL_COUNT],
            biofeedback: Biofeedback::default(),
            supplements: String::new(),
            notes: String::new(),
        }
    }
}

impl DailyRecord {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in self.biofeedback.ratings() {
            if !(1..=5).contains(&value) {
                return Err(format!("biofeedback.{name} must be between 1 and 5"));
            }
        }
        for (index, option) in self.meal_options.iter().enumerate() {
            if !(1..=OPTION_COUNT as u8).contains(option) {
                return Err(format!(
                    "mealOptions[{index}] must be between 1 and {OPTION_COUNT}"
                ));
            }
        }
        Ok(())
    }

    /// Count of meal slots with something other than whitespace in them.
    pub fn meals_logged(&self) -> usize {
        self.meals.iter().filter(|meal| !meal.trim().is_empty()).count()
    }

    pub fn steps_value(&self) -> Option<f64> {
        let steps = self.steps.trim();
        if steps.is_empty() {
            return None;
        }
        steps.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

/// The reusable grid of meal options plus the supplements blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MealPlanTemplate {
    pub meals: [[String; OPTION_COUNT]; MEAL_COUNT],
    pub supplements: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub completed: bool,
    pub record: DailyRecord,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    pub date: NaiveDate,
    pub streak: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_summary: Option<WeeklySummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub date: NaiveDate,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrainingSessionCounts {
    pub rest: u32,
    pub weight: u32,
    pub cardio: u32,
    pub hiit: u32,
    pub bodyweight: u32,
}

impl TrainingSessionCounts {
    pub fn record(&mut self, training: TrainingType) {
        let bucket = match training {
            TrainingType::Unset => return,
            TrainingType::Rest => &mut self.rest,
            TrainingType::Weight => &mut self.weight,
            TrainingType::Cardio => &mut self.cardio,
            TrainingType::Hiit => &mut self.hiit,
            TrainingType::Bodyweight => &mut self.bodyweight,
        };
        *bucket = bucket.saturating_add(1);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days_logged: u32,
    pub steps_average: u64,
    pub training_sessions: TrainingSessionCounts,
    pub total_meals_logged: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub completed: bool,
    pub is_today: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekStrip {
    pub week: String,
    pub days: Vec<WeekDay>,
}

/// Body forwarded to the automation webhook on commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub client_id: String,
    pub date: NaiveDate,
    pub training_type: TrainingType,
    pub weight: String,
    pub steps: String,
    pub water_intake: String,
    pub bathroom: BathroomCount,
    pub supplements: String,
    pub meals: [String; MEAL_COUNT],
    pub biofeedback: Biofeedback,
    pub notes: String,
}

impl WebhookPayload {
    pub fn new(client_id: &str, date: NaiveDate, record: DailyRecord) -> Self {
        Self {
            client_id: client_id.to_string(),
            date,
            training_type: record.training_type,
            weight: record.weight,
            steps: record.steps,
            water_intake: record.water_intake,
            bathroom: record.bathroom,
            supplements: record.supplements,
            meals: record.meals,
            biofeedback: record.biofeedback,
            notes: record.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientQuery {
    pub client: Option<String>,
}
