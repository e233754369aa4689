use crate::components::layout::Layout;
use crate::pages::dashboard::{
    components::{AttendanceModal, AttendanceTable, FieldTripModal, MonthYearFilters, StatsCards},
    view_model::{use_dashboard_view_model, DashboardViewModel},
};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    view! {
        <Layout active="/dashboard">
            <DashboardContent vm=vm/>
        </Layout>
    }
}

#[component]
pub fn DashboardContent(vm: DashboardViewModel) -> impl IntoView {
    let close_details = Callback::new(move |_| vm.detail_user.set(None));
    let close_trips = Callback::new(move |saved: bool| vm.close_field_trips(saved));

    view! {
        <div class="dashboard-content space-y-6">
            <MonthYearFilters month=vm.month year=vm.year on_refresh=vm.refresh/>
            <StatsCards data=vm.data/>
            <AttendanceTable
                data=vm.data
                loading=vm.loading
                error=vm.error
                on_view=vm.open_details()
                on_manage_trips=vm.open_field_trips()
            />
            {move || vm.detail_user.get().map(|user| view! {
                <AttendanceModal user=user on_close=close_details/>
            })}
            {move || vm.trip_user.get().map(|user| view! {
                <FieldTripModal user=user on_close=close_trips/>
            })}
        </div>
    }
}
