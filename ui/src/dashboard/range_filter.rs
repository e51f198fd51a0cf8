use dioxus::prelude::*;
use time::Date;

use crate::analytics::{QuickRangePreset, RangeSelection};
use crate::core::format::format_date_input;
use crate::t;

/// Quick-range buttons plus the two date pickers. The button matching the
/// current fields is marked active; a custom or blank range marks none.
#[component]
pub fn RangeFilter(from_input: Signal<String>, to_input: Signal<String>, today: Date) -> Element {
    let mut from_input = from_input;
    let mut to_input = to_input;

    let selection = RangeSelection::from_inputs(&from_input(), &to_input());
    let active = selection.preset(today);
    let max_date = format_date_input(today);

    rsx! {
        section { class: "dashboard-card range-filter",
            div { class: "dashboard-card__header",
                h2 { {t!("range-heading")} }
            }

            div { class: "range-filter__presets",
                for preset in QuickRangePreset::ALL_BUTTONS {
                    button {
                        key: "{preset}",
                        r#type: "button",
                        class: preset_class(preset == active),
                        "data-range": preset.as_str(),
                        onclick: move |_| {
                            if let Some((from, to)) = preset.range(today) {
                                tracing::debug!(%preset, "applying quick range");
                                from_input.set(format_date_input(from));
                                to_input.set(format_date_input(to));
                            }
                        },
                        {preset_label(preset)}
                    }
                }
            }

            div { class: "range-filter__dates",
                label { class: "range-filter__field",
                    span { {t!("range-from")} }
                    input {
                        r#type: "date",
                        value: "{from_input}",
                        max: "{max_date}",
                        oninput: move |evt: FormEvent| from_input.set(evt.value()),
                    }
                }
                label { class: "range-filter__field",
                    span { {t!("range-to")} }
                    input {
                        r#type: "date",
                        value: "{to_input}",
                        max: "{max_date}",
                        oninput: move |evt: FormEvent| to_input.set(evt.value()),
                    }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: !selection.is_selected(),
                    onclick: move |_| {
                        from_input.set(String::new());
                        to_input.set(String::new());
                    },
                    {t!("range-clear")}
                }
            }
        }
    }
}

fn preset_class(active: bool) -> &'static str {
    if active {
        "range-filter__preset range-filter__preset--active"
    } else {
        "range-filter__preset"
    }
}

fn preset_label(preset: QuickRangePreset) -> String {
    match preset {
        QuickRangePreset::Today => t!("range-today"),
        QuickRangePreset::Last7 => t!("range-7"),
        QuickRangePreset::Last30 => t!("range-30"),
        QuickRangePreset::Last90 => t!("range-90"),
        QuickRangePreset::Last365 => t!("range-365"),
        QuickRangePreset::YearToDate => t!("range-ytd"),
        QuickRangePreset::Custom => preset.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn active_buttons(from: &str, to: &str, today: Date) -> Vec<QuickRangePreset> {
        let active = RangeSelection::from_inputs(from, to).preset(today);
        QuickRangePreset::ALL_BUTTONS
            .into_iter()
            .filter(|preset| preset_class(*preset == active).ends_with("--active"))
            .collect()
    }

    #[test]
    fn each_preset_range_marks_only_its_own_button() {
        let today = date!(2024 - 06 - 15);
        for preset in QuickRangePreset::ALL_BUTTONS {
            let (from, to) = preset.range(today).expect("buttons carry a range");
            let marked = active_buttons(&format_date_input(from), &format_date_input(to), today);
            assert_eq!(marked, [preset]);
        }
    }

    #[test]
    fn custom_and_blank_ranges_mark_nothing() {
        let today = date!(2024 - 06 - 15);
        assert!(active_buttons("2024-06-01", "2024-06-10", today).is_empty());
        assert!(active_buttons("", "", today).is_empty());
        assert!(active_buttons("2024-06-09", "", today).is_empty());
    }
}
