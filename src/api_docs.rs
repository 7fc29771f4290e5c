use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::dashboard::get_dashboard,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
        api::copy::get_book_copies,
        api::copy::add_copy,
        api::copy::delete_copy,
        api::member::list_members,
        api::member::create_member,
        api::member::get_member,
        api::member::update_member,
        api::member::delete_member,
        api::staff::list_staff,
        api::staff::create_staff,
        api::staff::delete_staff,
        api::loan::list_transactions,
        api::loan::issue_options,
        api::loan::issue_copy,
        api::loan::return_copy,
        api::fine::list_fines,
        api::fine::pay_fine,
    ),
    components(
        schemas(
            api::books::CreateBookRequest,
            api::books::UpdateBookRequest,
            api::copy::AddCopyRequest,
            api::member::MemberRequest,
            api::staff::CreateStaffRequest,
            api::loan::IssueRequest,
        )
    ),
    tags(
        (name = "libradesk", description = "Library administration API")
    )
)]
pub struct ApiDoc;
