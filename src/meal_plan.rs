use crate::errors::AppError;
use crate::models::{DailyRecord, MEAL_COUNT, MealPlanTemplate, OPTION_COUNT};
use crate::storage::Storage;

pub const MEAL_PLAN_KEY: &str = "mealPlanData";

/// Row of the meal plan grid, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealSlot(usize);

/// Column of the meal plan grid, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSlot(usize);

impl MealSlot {
    pub fn new(index: usize) -> Option<Self> {
        (index < MEAL_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl OptionSlot {
    pub fn new(index: usize) -> Option<Self> {
        (index < OPTION_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// The 1-based number shown on the option buttons.
    pub fn number(self) -> u8 {
        self.0 as u8 + 1
    }
}

pub trait MealPlanStore {
    fn load_plan(&self) -> MealPlanTemplate;

    fn save_plan(&mut self, plan: &MealPlanTemplate) -> Result<(), AppError>;

    fn meal_option(&self, meal: MealSlot, option: OptionSlot) -> String {
        self.load_plan().meals[meal.index()][option.index()].clone()
    }
}

impl MealPlanStore for Storage {
    fn load_plan(&self) -> MealPlanTemplate {
        self.get(MEAL_PLAN_KEY).unwrap_or_default()
    }

    fn save_plan(&mut self, plan: &MealPlanTemplate) -> Result<(), AppError> {
        self.set(MEAL_PLAN_KEY, plan)
    }
}

/// Copies a plan option into the matching meal of `record` and remembers
/// which option was picked. Returns false, leaving `record` untouched, when
/// the plan has nothing in that slot.
pub fn apply_meal_option(
    plan: &impl MealPlanStore,
    record: &mut DailyRecord,
    meal: MealSlot,
    option: OptionSlot,
) -> bool {
    let selected = plan.meal_option(meal, option);
    if selected.is_empty() {
        return false;
    }
    record.meals[meal.index()] = selected;
    record.meal_options[meal.index()] = option.number();
    true
}

pub fn paste_supplements(plan: &MealPlanTemplate, record: &mut DailyRecord) {
    record.supplements = plan.supplements.clone();
}
