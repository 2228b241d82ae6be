use gloo::timers::callback::Timeout;
use mnemo_core::contact::{self, Field, FieldError, Submission};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const POPUP_MS: u32 = 3_000;

/// One input of the form.
#[derive(Copy, Clone, Debug, PartialEq)]
struct InputDef {
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    field: Field,
}

const INPUTS: [InputDef; 8] = [
    InputDef { id: "firstName", label: "Name", kind: "text", field: Field::Name },
    InputDef { id: "surname", label: "Surname", kind: "text", field: Field::Surname },
    InputDef { id: "email", label: "Email", kind: "email", field: Field::Email },
    InputDef { id: "phone", label: "Phone number", kind: "tel", field: Field::Phone },
    InputDef { id: "address", label: "Address", kind: "text", field: Field::Address },
    InputDef { id: "rating1", label: "Rating 1", kind: "number", field: Field::Rating },
    InputDef { id: "rating2", label: "Rating 2", kind: "number", field: Field::Rating },
    InputDef { id: "rating3", label: "Rating 3", kind: "number", field: Field::Rating },
];

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ContactMsg {
    Input(usize, String),
    Submit,
    DismissPopup,
}

/// Current text and validation result of every input.
#[derive(Clone, Debug, Default, PartialEq)]
struct FormState {
    values: [String; INPUTS.len()],
    checks: [Option<Result<(), FieldError>>; INPUTS.len()],
}

impl FormState {
    fn set(&mut self, index: usize, raw: String) {
        let Some(def) = INPUTS.get(index) else {
            return;
        };
        let value = match def.field {
            Field::Phone => contact::format_phone(&raw),
            _ => raw,
        };
        self.checks[index] = Some(contact::validate(def.field, &value));
        self.values[index] = value;
    }

    fn is_valid(&self) -> bool {
        INPUTS
            .iter()
            .zip(&self.values)
            .all(|(def, value)| contact::validate(def.field, value).is_ok())
    }

    fn submission(&self) -> Option<Submission> {
        if !self.is_valid() {
            return None;
        }
        let [name, surname, email, phone, address, r1, r2, r3] = &self.values;
        let ratings = [r1, r2, r3].map(|value| contact::parse_rating(value).unwrap_or_default());
        Some(Submission {
            name: name.trim().to_string(),
            surname: surname.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.clone(),
            address: address.trim().to_string(),
            ratings,
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct ContactForm {
    state: FormState,
    result: Option<Submission>,
    popup: Option<Timeout>,
}

impl ContactForm {
    fn view_input(&self, ctx: &Context<Self>, index: usize, def: &InputDef) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactMsg::Input(index, input.value())
        });
        let check = self.state.checks[index];
        let class = classes!(
            "form-control",
            match check {
                Some(Ok(())) => Some("is-valid"),
                Some(Err(_)) => Some("is-invalid"),
                None => None,
            }
        );
        let message = match check {
            Some(Err(err)) => err.to_string(),
            _ => String::new(),
        };

        html! {
            <div class="field">
                <label for={def.id}>{def.label}</label>
                <input
                    id={def.id}
                    type={def.kind}
                    {class}
                    value={self.state.values[index].clone()}
                    {oninput}
                />
                <small class="feedback">{message}</small>
            </div>
        }
    }

    fn view_result(&self) -> Html {
        let Some(submission) = &self.result else {
            return html! {};
        };

        html! {
            <>
                <p>{format!("Name: {}", submission.name)}</p>
                <p>{format!("Surname: {}", submission.surname)}</p>
                <p>{format!("Email: {}", submission.email)}</p>
                <p>{format!("Phone number: {}", submission.phone)}</p>
                <p>{format!("Address: {}", submission.address)}</p>
                <p class={submission.band().css_class()}>{submission.summary()}</p>
            </>
        }
    }
}

impl Component for ContactForm {
    type Message = ContactMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use ContactMsg::*;

        match msg {
            Input(index, raw) => {
                self.state.set(index, raw);
                true
            }
            Submit => {
                let Some(submission) = self.state.submission() else {
                    log::debug!("submit ignored, form invalid");
                    return false;
                };
                log::info!("form submitted: {:?}", submission);
                self.result = Some(submission);

                let link = ctx.link().clone();
                self.popup = Some(Timeout::new(POPUP_MS, move || {
                    link.send_message(DismissPopup)
                }));
                true
            }
            DismissPopup => self.popup.take().is_some(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactMsg::Submit
        });

        html! {
            <>
                <form id="contact-form" {onsubmit} novalidate={true}>
                    {
                        for INPUTS.iter().enumerate().map(|(index, def)| {
                            self.view_input(ctx, index, def)
                        })
                    }
                    <button id="submitButton" type="submit" disabled={!self.state.is_valid()}>
                        {"Submit"}
                    </button>
                </form>
                <section id="form-results">{self.view_result()}</section>
                if self.popup.is_some() {
                    <div class="success-popup">{"Form submitted successfully!"}</div>
                }
            </>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        let mut state = FormState::default();
        for (index, raw) in [
            "Ada",
            "Lovelace",
            "ada@example.org",
            "385912345678",
            "Main St 1",
            "9",
            "8",
            "10",
        ]
        .into_iter()
        .enumerate()
        {
            state.set(index, raw.to_string());
        }
        state
    }

    #[test]
    fn phone_input_is_masked_on_entry() {
        let mut state = FormState::default();
        state.set(3, "385 91".to_string());
        assert_eq!(state.values[3], "+385 91");
        assert_eq!(state.checks[3], Some(Err(FieldError::PhoneTooShort)));
    }

    #[test]
    fn untouched_inputs_have_no_check() {
        let mut state = FormState::default();
        state.set(0, "Ada".to_string());
        assert_eq!(state.checks[0], Some(Ok(())));
        assert_eq!(state.checks[1], None);
        assert!(!state.is_valid());
    }

    #[test]
    fn complete_form_builds_submission() {
        let state = filled();
        assert!(state.is_valid());

        let submission = state.submission().unwrap();
        assert_eq!(submission.phone, "+385 912 345 678");
        assert_eq!(submission.ratings, [9.0, 8.0, 10.0]);
        assert_eq!(submission.summary(), "Ada Lovelace: 9.0");
        assert_eq!(submission.band().css_class(), "avg-green");
    }

    #[test]
    fn invalid_rating_blocks_submission() {
        let mut state = filled();
        state.set(6, "11".to_string());
        assert_eq!(state.checks[6], Some(Err(FieldError::RatingOutOfRange)));
        assert_eq!(state.submission(), None);
    }
}
