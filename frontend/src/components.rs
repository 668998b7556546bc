use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::api::HttpExpenseApi;
use crate::chart::{ChartSlot, PieChart, SliceShape, CENTER, CHART_TITLE, RADIUS};
use crate::config::ViewConfig;
use crate::model::{format_currency, Expense};
use crate::notify::{NoticeAction, Notification, NotificationStack, Severity};
use crate::view::{ExpenseView, ViewSurface};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListState {
    #[default]
    Loading,
    Unavailable,
    Loaded(Vec<Expense>),
}

pub enum ListAction {
    Loaded(Vec<Expense>),
    Failed,
}

impl Reducible for ListState {
    type Action = ListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ListAction::Loaded(list) => Rc::new(ListState::Loaded(list)),
            // a failed refresh keeps whatever was already shown
            ListAction::Failed if matches!(*self, ListState::Loaded(_)) => self,
            ListAction::Failed => Rc::new(ListState::Unavailable),
        }
    }
}

/// Yew state handles standing in for the page regions.
#[derive(Clone)]
pub struct YewSurface {
    expenses: UseReducerHandle<ListState>,
    chart: UseReducerHandle<ChartSlot>,
    receipt: UseStateHandle<Option<Expense>>,
    notices: UseReducerHandle<NotificationStack>,
}

impl ViewSurface for YewSurface {
    fn show_expenses(&self, expenses: Vec<Expense>) {
        self.expenses.dispatch(ListAction::Loaded(expenses));
    }

    fn expenses_unavailable(&self) {
        self.expenses.dispatch(ListAction::Failed);
    }

    fn draw_chart(&self, chart: PieChart) {
        self.chart.dispatch(chart);
    }

    fn show_receipt(&self, expense: Expense) {
        self.receipt.set(Some(expense));
    }

    fn notify(&self, severity: Severity, message: String) {
        self.notices.dispatch(NoticeAction::Push { severity, message });
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ViewConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let expenses = use_reducer(ListState::default);
    let chart = use_reducer(ChartSlot::default);
    let receipt = use_state(|| None::<Expense>);
    let notices = use_reducer(NotificationStack::default);

    let config = &props.config;
    let panels = config.panels;

    let view = {
        let surface = YewSurface {
            expenses: expenses.clone(),
            chart: chart.clone(),
            receipt: receipt.clone(),
            notices: notices.clone(),
        };
        let api = HttpExpenseApi::new(config);
        use_memo(move |_| ExpenseView::new(api, surface, panels), ())
    };

    {
        let view = view.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    view.load_on_start().await;
                });
                || ()
            },
            (),
        );
    }

    let on_submit = {
        let view = view.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = match e.target_dyn_into::<HtmlFormElement>() {
                Some(form) => form,
                None => return,
            };
            match FormData::new_with_form(&form) {
                Ok(data) => {
                    let view = view.clone();
                    spawn_local(async move {
                        view.submit_receipt(data).await;
                    });
                }
                Err(err) => {
                    log::error!("could not read upload form: {:?}", err);
                    view.surface().notify(
                        Severity::Error,
                        "Could not read the selected file.".to_string(),
                    );
                }
            }
        })
    };

    let on_dismiss = {
        let notices = notices.clone();
        Callback::from(move |id: u64| notices.dispatch(NoticeAction::Dismiss(id)))
    };

    let symbol = config.currency_symbol.clone();

    html! {
        <div class="container">
            <NoticeList
                notices={notices.items.clone()}
                timeout_ms={config.notification_timeout_ms}
                on_dismiss={on_dismiss}
            />
            { if panels.upload_form {
                html! { <UploadForm on_submit={on_submit} /> }
            } else { html! {} } }
            { if panels.receipt_detail {
                html! { <ReceiptDetail expense={(*receipt).clone()} currency_symbol={symbol.clone()} /> }
            } else { html! {} } }
            <div class="row">
                { if panels.expense_list {
                    html! {
                        <div class="col-md-7">
                            <ExpenseList state={(*expenses).clone()} currency_symbol={symbol.clone()} />
                        </div>
                    }
                } else { html! {} } }
                { if panels.chart {
                    html! {
                        <div class="col-md-5">
                            <CategoryChart chart={chart.current().cloned()} currency_symbol={symbol.clone()} />
                        </div>
                    }
                } else { html! {} } }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct UploadFormProps {
    pub on_submit: Callback<SubmitEvent>,
}

#[function_component(UploadForm)]
pub fn upload_form(props: &UploadFormProps) -> Html {
    html! {
        <form id="upload-form" class="mb-4" enctype="multipart/form-data" onsubmit={props.on_submit.clone()}>
            <div class="input-group">
                <input type="file" name="receipt" accept="image/*" class="form-control" required={true} />
                <button type="submit" class="btn btn-primary">{"Upload Receipt"}</button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeListProps {
    pub notices: Vec<Notification>,
    pub timeout_ms: u32,
    pub on_dismiss: Callback<u64>,
}

#[function_component(NoticeList)]
pub fn notice_list(props: &NoticeListProps) -> Html {
    html! {
        <div class="notifications">
            { for props.notices.iter().map(|n| html! {
                <NoticeBanner
                    key={n.id}
                    notice={n.clone()}
                    timeout_ms={props.timeout_ms}
                    on_dismiss={props.on_dismiss.clone()}
                />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notice: Notification,
    pub timeout_ms: u32,
    pub on_dismiss: Callback<u64>,
}

/// Pending auto-dismiss of one banner, counted from when it is mounted.
pub struct Expiry {
    pub id: u64,
    pub delay_ms: u32,
    on_dismiss: Callback<u64>,
}

impl Expiry {
    pub fn for_banner(props: &NoticeBannerProps) -> Self {
        Self {
            id: props.notice.id,
            delay_ms: props.timeout_ms,
            on_dismiss: props.on_dismiss.clone(),
        }
    }

    pub fn fire(self) {
        self.on_dismiss.emit(self.id);
    }

    pub fn start(self) -> Timeout {
        Timeout::new(self.delay_ms, move || self.fire())
    }
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let id = props.notice.id;

    {
        let expiry = Expiry::for_banner(props);
        use_effect_with_deps(
            move |_| {
                let timeout = expiry.start();
                move || drop(timeout)
            },
            id,
        );
    }

    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={props.notice.severity.class()} role="alert">
            { &props.notice.message }
            <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    pub state: ListState,
    pub currency_symbol: String,
}

#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    let body = match &props.state {
        ListState::Loading => html! { <p class="text-muted">{"Loading expenses..."}</p> },
        ListState::Unavailable => {
            html! { <p class="text-muted">{"Expenses could not be loaded."}</p> }
        }
        ListState::Loaded(list) if list.is_empty() => {
            html! { <p class="text-muted">{"No expenses recorded yet."}</p> }
        }
        ListState::Loaded(list) => html! {
            <>
                { for list.iter().enumerate().map(|(idx, expense)| html! {
                    <ExpenseCard key={idx} expense={expense.clone()} currency_symbol={props.currency_symbol.clone()} />
                }) }
            </>
        },
    };

    html! {
        <div id="expenses-container">
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpenseCardProps {
    pub expense: Expense,
    pub currency_symbol: String,
}

#[function_component(ExpenseCard)]
pub fn expense_card(props: &ExpenseCardProps) -> Html {
    let expense = &props.expense;
    let symbol = &props.currency_symbol;

    html! {
        <div class="expense-item mb-3 p-3 border rounded">
            <h5>{ &expense.store_name }</h5>
            <p>{ format!("Date: {}", expense.date) }</p>
            <p>{ format!("Total: {}", format_currency(expense.total_amount, symbol)) }</p>
            <p>{ format!("Category: {}", expense.category) }</p>
            <h6>{"Items:"}</h6>
            <ul>
                { for expense.items.iter().map(|item| html! {
                    <li>{ format!("{} - {} ({})", item.name, format_currency(item.price, symbol), item.category) }</li>
                }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ReceiptDetailProps {
    pub expense: Option<Expense>,
    pub currency_symbol: String,
}

/// Last receipt parsed by an upload.
#[function_component(ReceiptDetail)]
pub fn receipt_detail(props: &ReceiptDetailProps) -> Html {
    html! {
        <div id="receipt-data" class="mb-4">
            { match &props.expense {
                Some(expense) => html! {
                    <>
                        <h4>{"Latest receipt"}</h4>
                        <ExpenseCard expense={expense.clone()} currency_symbol={props.currency_symbol.clone()} />
                    </>
                },
                None => html! {},
            } }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub chart: Option<PieChart>,
    pub currency_symbol: String,
}

#[function_component(CategoryChart)]
pub fn category_chart(props: &CategoryChartProps) -> Html {
    let size = (CENTER * 2.0).to_string();
    let view_box = format!("0 0 {} {}", size, size);

    let content = match &props.chart {
        None => html! {},
        Some(chart) if chart.is_empty() => html! { <p class="text-muted">{"No data"}</p> },
        Some(chart) => html! {
            <>
                <svg id="expenses-chart" width={size.clone()} height={size.clone()} viewBox={view_box}>
                    { for chart.slices.iter().map(|slice| match &slice.shape {
                        SliceShape::FullCircle => html! {
                            <circle cx={CENTER.to_string()} cy={CENTER.to_string()} r={RADIUS.to_string()} fill={slice.color} />
                        },
                        SliceShape::Wedge(path) => html! {
                            <path d={path.clone()} fill={slice.color} stroke="#fff" stroke-width="1" />
                        },
                        SliceShape::Empty => html! {},
                    }) }
                </svg>
                <ul class="list-unstyled mt-3">
                    { for chart.slices.iter().map(|slice| html! {
                        <li class="d-flex align-items-center gap-2">
                            <span class="legend-swatch" style={format!("display:inline-block;width:12px;height:12px;background:{}", slice.color)}></span>
                            <span>{ format!("{}: {}", slice.label, format_currency(slice.value, &props.currency_symbol)) }</span>
                        </li>
                    }) }
                </ul>
            </>
        },
    };

    let title = props
        .chart
        .as_ref()
        .map(|c| c.title)
        .unwrap_or(CHART_TITLE);

    html! {
        <div id="chart-container">
            <h5>{ title }</h5>
            { content }
        </div>
    }
}
