pub mod meal_plan;
pub mod meal_plan_item;
