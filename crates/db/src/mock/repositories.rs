use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAuthAccount, DbBooking, DbProfile, DbSchedule, DbScheduleWithTrainer, DbSession};
use crate::repositories::booking::BookingFilter;
use gators_core::models::booking::{NewBooking, UpdateBookingRequest};
use gators_core::models::schedule::{NewSchedule, UpdateScheduleRequest};

// Mock repositories for testing

mock! {
    pub ProfileRepo {
        pub async fn create_profile(
            &self,
            id: Uuid,
            full_name: &'static str,
            email: &'static str,
            phone: Option<&'static str>,
            role: &'static str,
            level: Option<&'static str>,
        ) -> eyre::Result<DbProfile>;

        pub async fn get_profile_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn list_profiles(
            &self,
            role: Option<&'static str>,
        ) -> eyre::Result<Vec<DbProfile>>;

        pub async fn update_profile(
            &self,
            id: Uuid,
            full_name: Option<&'static str>,
            email: Option<&'static str>,
            phone: Option<&'static str>,
            level: Option<&'static str>,
        ) -> eyre::Result<DbProfile>;

        pub async fn delete_profile(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn restore_profile(
            &self,
            profile: DbProfile,
        ) -> eyre::Result<DbProfile>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn create_booking(
            &self,
            booking: NewBooking,
        ) -> eyre::Result<DbBooking>;

        pub async fn get_booking_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn list_bookings(
            &self,
            filter: BookingFilter,
        ) -> eyre::Result<Vec<DbBooking>>;

        pub async fn update_booking(
            &self,
            id: Uuid,
            patch: UpdateBookingRequest,
        ) -> eyre::Result<DbBooking>;

        pub async fn set_attendance(
            &self,
            id: Uuid,
            attendance: Option<&'static str>,
        ) -> eyre::Result<DbBooking>;

        pub async fn delete_booking(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn count_bookings_for_slot(
            &self,
            trainer_id: Uuid,
            day: NaiveDate,
            time: &'static str,
        ) -> eyre::Result<i64>;
    }
}

mock! {
    pub ScheduleRepo {
        pub async fn create_schedule(
            &self,
            schedule: NewSchedule,
        ) -> eyre::Result<DbSchedule>;

        pub async fn get_schedule_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSchedule>>;

        pub async fn list_schedules(
            &self,
            trainer_id: Option<Uuid>,
        ) -> eyre::Result<Vec<DbScheduleWithTrainer>>;

        pub async fn list_active_for_trainer_date(
            &self,
            trainer_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbSchedule>>;

        pub async fn update_schedule(
            &self,
            id: Uuid,
            patch: UpdateScheduleRequest,
        ) -> eyre::Result<DbSchedule>;

        pub async fn delete_schedule(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn count_active_schedules(&self) -> eyre::Result<i64>;
    }
}

mock! {
    pub AuthRepo {
        pub async fn create_account(
            &self,
            id: Uuid,
            email: &'static str,
            password_hash: &'static str,
            role: &'static str,
        ) -> eyre::Result<DbAuthAccount>;

        pub async fn get_account_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbAuthAccount>>;

        pub async fn verify_credentials(
            &self,
            email: &'static str,
            password: &'static str,
        ) -> eyre::Result<Option<DbAuthAccount>>;

        pub async fn update_account_email(
            &self,
            id: Uuid,
            new_email: &'static str,
        ) -> eyre::Result<DbAuthAccount>;

        pub async fn delete_account(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn create_session(
            &self,
            account_id: Uuid,
        ) -> eyre::Result<DbSession>;

        pub async fn get_session(
            &self,
            token: Uuid,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn delete_session(
            &self,
            token: Uuid,
        ) -> eyre::Result<bool>;
    }
}
