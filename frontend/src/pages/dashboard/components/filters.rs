use crate::{
    pages::dashboard::utils::{current_year_month, selectable_years},
    utils::time::month_name,
};
use leptos::*;

#[component]
pub fn MonthYearFilters(
    month: RwSignal<u32>,
    year: RwSignal<i32>,
    #[prop(optional)] on_refresh: Option<Callback<()>>,
) -> impl IntoView {
    let (current_year, _) = current_year_month();
    let mut years = selectable_years(current_year);
    let selected = year.get_untracked();
    if !years.contains(&selected) {
        years.push(selected);
    }

    view! {
        <div class="dashboard-filters flex flex-wrap items-center gap-3">
            <select
                class="select-brutal rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm text-fg"
                aria-label="Month"
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                        month.set(value);
                    }
                }
            >
                {(1..=12u32)
                    .map(|m| {
                        view! {
                            <option value=m.to_string() selected=move || month.get() == m>
                                {month_name(m)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select
                class="select-brutal rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm text-fg"
                aria-label="Year"
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<i32>() {
                        year.set(value);
                    }
                }
            >
                {years
                    .into_iter()
                    .map(|y| {
                        view! {
                            <option value=y.to_string() selected=move || year.get() == y>
                                {y}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            {on_refresh.map(|refresh| view! {
                <button
                    type="button"
                    class="btn-brutal rounded-md bg-action-primary-bg px-4 py-2 text-sm font-semibold text-action-primary-text hover:bg-action-primary-bg-hover"
                    on:click=move |_| refresh.call(())
                >
                    "Refresh"
                </button>
            })}
        </div>
    }
}
