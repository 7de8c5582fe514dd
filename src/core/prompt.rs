use crate::domain::model::{FormInput, TradeType, VehicleForm};

/// Renders the car details block. Raw form text is used so the advisor sees
/// exactly what the user typed, including details that look wrong.
pub fn car_details(form: &FormInput) -> String {
    format!(
        "Fuel Type: {}\n\
         Transmission: {}\n\
         Color: {}\n\
         Clean Title: {}\n\
         Mileage: {}\n\
         Accident History(no of accidents): {}\n\
         Brand: {}\n\
         Years Used: {}\n\
         Model: {}\n\
         Trade Type: {}",
        form.fuel_type,
        form.transmission,
        form.color,
        form.clean_title,
        form.mileage,
        form.accident,
        form.brand,
        form.years_used,
        form.model,
        form.trade_type,
    )
}

fn trade_guidance(trade_type: Option<TradeType>) -> &'static str {
    match trade_type {
        Some(TradeType::Sale) => "The user is selling this car, so focus on what to fix or highlight before listing it.",
        Some(TradeType::Trade) => "The user is trading this car, so focus on what to inspect and how to judge a fair swap.",
        None => "Be clear about whether your advice is for buying or selling.",
    }
}

pub fn build_tip_prompt(form: &FormInput) -> String {
    let trade_type = form.trade_type.parse::<TradeType>().ok();
    format!(
        "As a friendly mechanic, give me helpful advice about this car:\n{}\n\n\
         Keep it to 5-6 sentences and include some emojis. \
         If any details seem incorrect or mismatched (like wrong model for the brand), point that out first. \
         {}",
        car_details(form),
        trade_guidance(trade_type),
    )
}

/// Prompt for an already validated form.
pub fn build_tip_prompt_for(form: &VehicleForm) -> String {
    let input = FormInput {
        fuel_type: form.fuel_type.clone(),
        transmission: form.transmission.clone(),
        color: form.color.clone(),
        clean_title: if form.clean_title { "yes" } else { "no" }.to_string(),
        mileage: form.mileage.to_string(),
        accident: form.accident.to_string(),
        brand: form.brand.clone(),
        years_used: form.years_used.to_string(),
        model: form.model.clone(),
        trade_type: form.trade_type.to_string(),
    };
    build_tip_prompt(&input)
}
