//! Member management and borrow history against the mocked API

use chrono::NaiveDate;
use mini_library::{error::ClientError, forms::UserForm, models::LoanStatus};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, ResponseTemplate,
};

use crate::common::spawn;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn lists_members() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Kim", "phone": "010-1234-5678", "memo": "" },
            { "id": 2, "username": "lee", "phone": "010-0000-0000" },
            { "id": 3, "name": "Choi", "memo": "weekends", "info": "weekends" }
        ])))
        .mount(&app.server)
        .await;

    let users = app.services.users.list().await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].display_name(), Some("Kim"));
    assert_eq!(users[1].display_name(), Some("lee"));
    assert_eq!(users[2].notes(), Some("weekends"));
}

#[tokio::test]
async fn creates_member() {
    let app = spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users"))
        .and(body_json(json!({ "name": "Kim", "phone": "010-1234-5678", "memo": "" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.server)
        .await;

    let form = UserForm {
        name: "Kim".into(),
        phone: "010-1234-5678".into(),
        memo: String::new(),
    };
    app.services.users.save(&form, None).await.unwrap();
}

#[tokio::test]
async fn edit_keeps_fields_not_given() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/user/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 4, "name": "Park", "phone": "010-1111-2222", "info": "prefers mornings" }
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/4"))
        .and(body_json(json!({ "name": "Park", "phone": "010-9999-8888", "memo": "prefers mornings" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    app.services
        .users
        .edit(4, None, Some("010-9999-8888".into()), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_member_needs_confirmation() {
    let app = spawn().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    assert!(matches!(
        app.services.users.delete(4, false).await,
        Err(ClientError::NotConfirmed(_))
    ));
    app.services.users.delete(4, true).await.unwrap();
}

#[tokio::test]
async fn detail_flags_overdue_loans_and_pages_locally() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/user/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "name": "Park", "dept": "Physics"
        })))
        .mount(&app.server)
        .await;

    let loans: Vec<serde_json::Value> = (1..=12)
        .map(|i| {
            json!({
                "loanId": i,
                "bookTitle": format!("Book {}", i),
                "loanDate": "2024-01-01",
                "returnExpireDate": if i == 11 { "2024-01-10" } else { "2024-12-31" },
                "status": "LOANING"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/loan/user/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(loans))
        .mount(&app.server)
        .await;

    let detail = app.services.users.detail(4, 1, day(2024, 2, 1)).await.unwrap();
    assert_eq!(detail.user.dept.as_deref(), Some("Physics"));
    assert_eq!(detail.loans.page.total_pages, 2);
    assert_eq!(detail.loans.content.len(), 2);
    assert_eq!(detail.loans.content[0].loan_id, 11);
    assert_eq!(detail.loans.content[0].status, LoanStatus::Late);
    assert_eq!(detail.loans.content[1].status, LoanStatus::Loaning);
    assert_eq!(detail.pager.next(), None);
}

#[tokio::test]
async fn history_filters_by_keyword() {
    let app = spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/borrows"))
        .and(query_param("keyword", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "bookTitle": "Dune", "userName": "kim", "borrowDate": "2024-01-01", "status": "연체" }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let records = app.services.history.search(" dune ").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_name.as_deref(), Some("kim"));
}
