use log::{debug, error};

use super::{
    Effect,
    events::Event,
    model::{Model, SUCCESS_MESSAGE},
};
use crate::{
    submission::{Acknowledgement, SubmitError},
    validation::validate,
};

/// Main update dispatcher - applies an event to the model and returns the effect
/// the shell has to carry out next
pub fn update(event: Event, model: &mut Model) -> Effect {
    match event {
        Event::DateChanged(date) => model.fields.date = date,
        Event::CarPlateChanged(car_plate) => model.fields.car_plate = car_plate,
        Event::MileageChanged(mileage) => model.fields.mileage = mileage,
        Event::AgentChanged(agent) => model.fields.agent = agent,
        Event::Submit => return handle_submit(model),
        Event::SubmitResponse(result) => handle_submit_response(result, model),
        Event::DismissAlert => model.clear_alert(),
    }

    Effect::Render
}

fn handle_submit(model: &mut Model) -> Effect {
    if model.is_submitting {
        debug!("submit ignored: a submission is already in flight");
        return Effect::Render;
    }

    match validate(&model.fields) {
        Ok(record) => {
            model.start_submitting();
            Effect::Submit(record)
        }
        Err(e) => {
            model.set_error(e.to_string());
            Effect::Render
        }
    }
}

fn handle_submit_response(result: Result<Acknowledgement, SubmitError>, model: &mut Model) {
    match result {
        Ok(ack) => {
            model.set_success(ack.message.unwrap_or_else(|| SUCCESS_MESSAGE.to_string()))
        }
        Err(e) => {
            error!("submission failed: {e}");
            model.set_error(e.to_string());
        }
    }
}
