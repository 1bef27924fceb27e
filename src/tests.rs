#[cfg(test)]
mod integration_tests {
    use crate::router::create_router;
    use crate::test_utils::test_utils::{
        bearer, create_crop, create_farm, register_user, setup_test_app_state, setup_test_server,
    };
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use common::Language;
    use compute::chatbot::{response_for, Topic};
    use model::entities::learning_resource;
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
    use serde_json::{json, Value};
    use std::str::FromStr;

    /// Decimals are serialized as strings; accept numbers too.
    fn decimal(value: &Value) -> Decimal {
        match value {
            Value::String(s) => Decimal::from_str(s).expect("invalid decimal string"),
            Value::Number(n) => Decimal::from_str(&n.to_string()).expect("invalid decimal number"),
            other => panic!("expected a decimal, got {}", other),
        }
    }

    async fn server_with_db() -> (TestServer, DatabaseConnection) {
        let state = setup_test_app_state().await;
        let db = state.db.clone();
        let server = TestServer::new(create_router(state)).unwrap();
        (server, db)
    }

    async fn seed_resource(db: &DatabaseConnection, title: &str, category: &str, language: &str) -> i32 {
        learning_resource::ActiveModel {
            title: Set(title.to_string()),
            description: Set(Some(format!("About {}", title))),
            content_type: Set("article".to_string()),
            category: Set(category.to_string()),
            language: Set(language.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to seed learning resource")
        .id
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_test_server().await;

        let response = server.get("/api/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "FarmConnect API is running");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = setup_test_server().await;

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert!(body["paths"]["/api/chatbot"].is_object());
    }

    #[tokio::test]
    async fn test_register_returns_user_and_token() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "name": "Ravi Kumar",
                "email": "ravi@example.com",
                "password": "pass1234",
                "phone": "9876543210",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["user"]["name"], "Ravi Kumar");
        assert_eq!(body["user"]["user_type"], "farmer");
        assert!(body["user"].get("password_hash").is_none());
        assert!(!body["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_rejected() {
        let server = setup_test_server().await;
        register_user(&server, "Asha", "asha@example.com", "farmer").await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({ "name": "Asha Again", "email": "asha@example.com", "password": "other" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "User already exists");
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let server = setup_test_server().await;

        let missing = server
            .post("/api/auth/register")
            .json(&json!({ "name": "No Password", "email": "np@example.com" }))
            .await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = missing.json();
        assert_eq!(body["error"], "Name, email, and password are required");

        let bad_type = server
            .post("/api/auth/register")
            .json(&json!({ "name": "X", "email": "x@example.com", "password": "p", "user_type": "admin" }))
            .await;
        bad_type.assert_status(StatusCode::BAD_REQUEST);

        let bad_email = server
            .post("/api/auth/register")
            .json(&json!({ "name": "X", "email": "not-an-email", "password": "p" }))
            .await;
        bad_email.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = bad_email.json();
        assert_eq!(body["error"], "Invalid email address");
    }

    #[tokio::test]
    async fn test_register_trims_email_before_validating() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({ "name": "Padded", "email": "  padded@example.com ", "password": "pass1234" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["user"]["email"], "padded@example.com");

        let login = server
            .post("/api/auth/login")
            .json(&json!({ "email": "padded@example.com", "password": "pass1234" }))
            .await;
        login.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_success_and_failures() {
        let server = setup_test_server().await;
        register_user(&server, "Meena", "meena@example.com", "buyer").await;

        let ok = server
            .post("/api/auth/login")
            .json(&json!({ "email": "meena@example.com", "password": "s3cret-pass" }))
            .await;
        ok.assert_status(StatusCode::OK);
        let body: Value = ok.json();
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["user"]["user_type"], "buyer");

        let wrong_password = server
            .post("/api/auth/login")
            .json(&json!({ "email": "meena@example.com", "password": "nope" }))
            .await;
        wrong_password.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = wrong_password.json();
        assert_eq!(body["error"], "Invalid credentials");

        let unknown = server
            .post("/api/auth/login")
            .json(&json!({ "email": "ghost@example.com", "password": "nope" }))
            .await;
        unknown.assert_status(StatusCode::UNAUTHORIZED);

        let missing = server.post("/api/auth/login").json(&json!({ "email": "meena@example.com" })).await;
        missing.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_protected_routes_require_valid_token() {
        let server = setup_test_server().await;

        let missing = server.get("/api/farms").await;
        missing.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = missing.json();
        assert_eq!(body["error"], "Access token required");

        let garbage = server
            .get("/api/farms")
            .add_header(AUTHORIZATION, bearer("not-a-jwt"))
            .await;
        garbage.assert_status(StatusCode::FORBIDDEN);
        let body: Value = garbage.json();
        assert_eq!(body["error"], "Invalid or expired token");

        let wrong_scheme = server
            .get("/api/farms")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Basic abc"))
            .await;
        wrong_scheme.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_farm_lifecycle_and_isolation() {
        let server = setup_test_server().await;
        let (owner, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;
        let (other, _) = register_user(&server, "Other", "other@example.com", "farmer").await;

        let farm_id = create_farm(&server, &owner, "River Plot").await;
        create_crop(&server, &owner, farm_id, "Paddy").await;

        let list = server.get("/api/farms").add_header(AUTHORIZATION, bearer(&owner)).await;
        list.assert_status(StatusCode::OK);
        let farms: Vec<Value> = list.json();
        assert_eq!(farms.len(), 1);
        assert_eq!(farms[0]["farm_name"], "River Plot");
        assert_eq!(decimal(&farms[0]["area_acres"]), Decimal::from_str("4.5").unwrap());

        let detail = server
            .get(&format!("/api/farms/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&owner))
            .await;
        detail.assert_status(StatusCode::OK);
        let body: Value = detail.json();
        assert_eq!(body["farm_name"], "River Plot");
        assert_eq!(body["crops"].as_array().unwrap().len(), 1);
        assert_eq!(body["crops"][0]["status"], "planted");

        let foreign = server
            .get(&format!("/api/farms/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&other))
            .await;
        foreign.assert_status(StatusCode::NOT_FOUND);
        let body: Value = foreign.json();
        assert_eq!(body["error"], "Farm not found");

        let others: Vec<Value> = server
            .get("/api/farms")
            .add_header(AUTHORIZATION, bearer(&other))
            .await
            .json();
        assert!(others.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_path_ids_return_json_errors() {
        let server = setup_test_server().await;
        let (token, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;

        for path in ["/api/farms/abc", "/api/yield/crop/99999999999", "/api/expenses/summary/farm/1.5"] {
            let response = server.get(path).add_header(AUTHORIZATION, bearer(&token)).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            let content_type = response.header("content-type");
            assert!(
                content_type.to_str().unwrap().starts_with("application/json"),
                "{} answered with {:?}",
                path,
                content_type
            );
            let body: Value = response.json();
            assert!(!body["error"].as_str().unwrap().is_empty());
        }

        let public = server.get("/api/learning/not-a-number").await;
        public.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = public.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_farm_requires_name() {
        let server = setup_test_server().await;
        let (token, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;

        let response = server
            .post("/api/farms")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "farm_name": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Farm name is required");
    }

    #[tokio::test]
    async fn test_crop_on_foreign_farm_is_forbidden_and_not_inserted() {
        let server = setup_test_server().await;
        let (owner, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;
        let (intruder, _) = register_user(&server, "Intruder", "intruder@example.com", "farmer").await;
        let farm_id = create_farm(&server, &owner, "Hill Farm").await;

        let response = server
            .post("/api/crops")
            .add_header(AUTHORIZATION, bearer(&intruder))
            .json(&json!({ "farm_id": farm_id, "crop_name": "Maize" }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body["error"], "Farm not found or access denied");

        let crops: Vec<Value> = server
            .get(&format!("/api/crops/farm/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&owner))
            .await
            .json();
        assert!(crops.is_empty());
    }

    #[tokio::test]
    async fn test_create_crop_requires_farm_and_name() {
        let server = setup_test_server().await;
        let (token, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;

        let response = server
            .post("/api/crops")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "crop_name": "Wheat" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Farm ID and crop name are required");
    }

    #[tokio::test]
    async fn test_register_farm_crop_yield_end_to_end() {
        let server = setup_test_server().await;
        let (token, _) = register_user(&server, "Gita", "gita@example.com", "farmer").await;
        let farm_id = create_farm(&server, &token, "North Field").await;
        let crop_id = create_crop(&server, &token, farm_id, "Wheat").await;

        let created = server
            .post("/api/yield")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "crop_id": crop_id, "quantity": 50, "harvest_date": "2024-03-01" }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created_body: Value = created.json();
        assert_eq!(created_body["message"], "Yield record added successfully");

        let response = server
            .get(&format!("/api/yield/crop/{}", crop_id))
            .add_header(AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::OK);
        let yields: Vec<Value> = response.json();
        assert_eq!(yields.len(), 1);
        assert_eq!(yields[0]["id"], created_body["id"]);
        assert_eq!(decimal(&yields[0]["quantity"]), Decimal::new(50, 0));
        assert_eq!(yields[0]["unit"], "kg");
        assert_eq!(yields[0]["harvest_date"], "2024-03-01");
    }

    #[tokio::test]
    async fn test_yield_validation_and_ownership() {
        let server = setup_test_server().await;
        let (owner, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;
        let (other, _) = register_user(&server, "Other", "other@example.com", "farmer").await;
        let farm_id = create_farm(&server, &owner, "East Field").await;
        let crop_id = create_crop(&server, &owner, farm_id, "Mustard").await;

        let zero_quantity = server
            .post("/api/yield")
            .add_header(AUTHORIZATION, bearer(&owner))
            .json(&json!({ "crop_id": crop_id, "quantity": 0, "harvest_date": "2024-03-01" }))
            .await;
        zero_quantity.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = zero_quantity.json();
        assert_eq!(body["error"], "Crop ID, quantity, and harvest date are required");

        let bad_rating = server
            .post("/api/yield")
            .add_header(AUTHORIZATION, bearer(&owner))
            .json(&json!({ "crop_id": crop_id, "quantity": 10, "harvest_date": "2024-03-01", "quality_rating": 7 }))
            .await;
        bad_rating.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = bad_rating.json();
        assert_eq!(body["error"], "Quality rating must be between 1 and 5");

        let foreign = server
            .post("/api/yield")
            .add_header(AUTHORIZATION, bearer(&other))
            .json(&json!({ "crop_id": crop_id, "quantity": 10, "harvest_date": "2024-03-01" }))
            .await;
        foreign.assert_status(StatusCode::FORBIDDEN);
        let body: Value = foreign.json();
        assert_eq!(body["error"], "Crop not found or access denied");

        let hidden: Vec<Value> = server
            .get(&format!("/api/yield/crop/{}", crop_id))
            .add_header(AUTHORIZATION, bearer(&other))
            .await
            .json();
        assert!(hidden.is_empty());
    }

    #[tokio::test]
    async fn test_expenses_listing_and_summary() {
        let server = setup_test_server().await;
        let (token, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;
        let farm_id = create_farm(&server, &token, "South Field").await;

        for (expense_type, amount, date) in [
            ("seeds", "100", "2024-01-10"),
            ("labour", "250.50", "2024-02-01"),
            ("seeds", "40.25", "2024-03-05"),
        ] {
            server
                .post("/api/expenses")
                .add_header(AUTHORIZATION, bearer(&token))
                .json(&json!({
                    "farm_id": farm_id,
                    "expense_type": expense_type,
                    "amount": amount,
                    "expense_date": date,
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let zero = server
            .post("/api/expenses")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "farm_id": farm_id, "expense_type": "seeds", "amount": 0, "expense_date": "2024-03-05" }))
            .await;
        zero.assert_status(StatusCode::BAD_REQUEST);

        let expenses: Vec<Value> = server
            .get(&format!("/api/expenses/farm/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .json();
        let dates: Vec<&str> = expenses.iter().map(|e| e["expense_date"].as_str().unwrap()).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-02-01", "2024-01-10"]);

        let summary: Vec<Value> = server
            .get(&format!("/api/expenses/summary/farm/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .json();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0]["expense_type"], "labour");
        assert_eq!(decimal(&summary[0]["total"]), Decimal::from_str("250.50").unwrap());
        assert_eq!(summary[1]["expense_type"], "seeds");
        assert_eq!(decimal(&summary[1]["total"]), Decimal::from_str("140.25").unwrap());
    }

    #[tokio::test]
    async fn test_diary_entries_are_scoped_to_owner() {
        let server = setup_test_server().await;
        let (owner, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;
        let (other, _) = register_user(&server, "Other", "other@example.com", "farmer").await;
        let farm_id = create_farm(&server, &owner, "Orchard").await;

        for (date, description) in [("2024-04-01", "Pruned trees"), ("2024-04-03", "Sprayed neem oil")] {
            server
                .post("/api/diary")
                .add_header(AUTHORIZATION, bearer(&owner))
                .json(&json!({
                    "farm_id": farm_id,
                    "entry_date": date,
                    "activity_type": "maintenance",
                    "description": description,
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let missing = server
            .post("/api/diary")
            .add_header(AUTHORIZATION, bearer(&owner))
            .json(&json!({ "farm_id": farm_id, "entry_date": "2024-04-05" }))
            .await;
        missing.assert_status(StatusCode::BAD_REQUEST);

        let entries: Vec<Value> = server
            .get(&format!("/api/diary/farm/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&owner))
            .await
            .json();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["description"], "Sprayed neem oil");

        let hidden: Vec<Value> = server
            .get(&format!("/api/diary/farm/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&other))
            .await
            .json();
        assert!(hidden.is_empty());
    }

    #[tokio::test]
    async fn test_resource_usage_and_summary() {
        let server = setup_test_server().await;
        let (token, _) = register_user(&server, "Owner", "owner@example.com", "farmer").await;
        let farm_id = create_farm(&server, &token, "Tube Well Farm").await;

        for (resource_type, quantity, unit, date) in [
            ("water", 1200, "litres", "2024-05-01"),
            ("water", 800, "litres", "2024-05-02"),
            ("electricity", 35, "kWh", "2024-05-02"),
        ] {
            server
                .post("/api/resources")
                .add_header(AUTHORIZATION, bearer(&token))
                .json(&json!({
                    "farm_id": farm_id,
                    "resource_type": resource_type,
                    "quantity": quantity,
                    "unit": unit,
                    "usage_date": date,
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let unknown_type = server
            .post("/api/resources")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({
                "farm_id": farm_id,
                "resource_type": "diesel",
                "quantity": 5,
                "unit": "litres",
                "usage_date": "2024-05-03",
            }))
            .await;
        unknown_type.assert_status(StatusCode::BAD_REQUEST);

        let missing = server
            .post("/api/resources")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "farm_id": farm_id, "resource_type": "water" }))
            .await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = missing.json();
        assert_eq!(body["error"], "All fields are required");

        let usage: Vec<Value> = server
            .get(&format!("/api/resources/farm/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .json();
        assert_eq!(usage.len(), 3);
        assert_eq!(usage[2]["usage_date"], "2024-05-01");

        let summary: Vec<Value> = server
            .get(&format!("/api/resources/summary/farm/{}", farm_id))
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .json();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0]["resource_type"], "electricity");
        assert_eq!(summary[0]["unit"], "kWh");
        assert_eq!(decimal(&summary[0]["total"]), Decimal::new(35, 0));
        assert_eq!(summary[1]["resource_type"], "water");
        assert_eq!(decimal(&summary[1]["total"]), Decimal::new(2000, 0));
    }

    #[tokio::test]
    async fn test_marketplace_listings() {
        let server = setup_test_server().await;
        let (seller, seller_id) = register_user(&server, "Seller", "seller@example.com", "farmer").await;
        let (buyer, _) = register_user(&server, "Buyer", "buyer@example.com", "buyer").await;
        let farm_id = create_farm(&server, &seller, "Market Garden").await;
        let crop_id = create_crop(&server, &seller, farm_id, "Tomato").await;

        let created = server
            .post("/api/marketplace")
            .add_header(AUTHORIZATION, bearer(&seller))
            .json(&json!({
                "crop_id": crop_id,
                "crop_name": "Tomato",
                "quantity": 300,
                "price_per_kg": "18.5",
                "location": "Khordha",
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["message"], "Listing created successfully");

        let foreign_crop = server
            .post("/api/marketplace")
            .add_header(AUTHORIZATION, bearer(&buyer))
            .json(&json!({ "crop_id": crop_id, "crop_name": "Tomato", "quantity": 1, "price_per_kg": 1 }))
            .await;
        foreign_crop.assert_status(StatusCode::FORBIDDEN);

        let missing_price = server
            .post("/api/marketplace")
            .add_header(AUTHORIZATION, bearer(&seller))
            .json(&json!({ "crop_name": "Onion", "quantity": 10 }))
            .await;
        missing_price.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = missing_price.json();
        assert_eq!(body["error"], "Crop name, quantity, and price are required");

        let public: Vec<Value> = server.get("/api/marketplace").await.json();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0]["seller_id"], seller_id);
        assert_eq!(public[0]["seller_name"], "Seller");
        assert_eq!(public[0]["seller_email"], "seller@example.com");
        assert_eq!(public[0]["unit"], "kg");
        assert_eq!(public[0]["status"], "available");

        let mine: Vec<Value> = server
            .get("/api/marketplace/my-listings")
            .add_header(AUTHORIZATION, bearer(&seller))
            .await
            .json();
        assert_eq!(mine.len(), 1);

        let none: Vec<Value> = server
            .get("/api/marketplace/my-listings")
            .add_header(AUTHORIZATION, bearer(&buyer))
            .await
            .json();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_buyer_marketplace_view_filters() {
        let server = setup_test_server().await;
        let (seller, _) = register_user(&server, "Seller", "seller@example.com", "farmer").await;
        let (buyer, _) = register_user(&server, "Buyer", "buyer@example.com", "buyer").await;

        for (crop_name, price) in [("Basmati Rice", 60), ("Potato", 15)] {
            server
                .post("/api/marketplace")
                .add_header(AUTHORIZATION, bearer(&seller))
                .json(&json!({ "crop_name": crop_name, "quantity": 100, "price_per_kg": price }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        server.get("/api/buyer/marketplaces").await.assert_status(StatusCode::UNAUTHORIZED);

        let all: Value = server
            .get("/api/buyer/marketplaces")
            .add_header(AUTHORIZATION, bearer(&buyer))
            .await
            .json();
        assert_eq!(all["listings"].as_array().unwrap().len(), 2);

        let rice: Value = server
            .get("/api/buyer/marketplaces")
            .add_query_param("crop_name", "rice")
            .add_header(AUTHORIZATION, bearer(&buyer))
            .await
            .json();
        let listings = rice["listings"].as_array().unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["crop_name"], "Basmati Rice");
        assert_eq!(listings[0]["seller_location"], "Bhubaneswar");

        let elsewhere: Value = server
            .get("/api/buyer/marketplaces")
            .add_query_param("location", "Delhi")
            .add_header(AUTHORIZATION, bearer(&buyer))
            .await
            .json();
        assert!(elsewhere["listings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_market_prices_list_and_latest_grouping() {
        let server = setup_test_server().await;

        for (crop, mandi, price, date, location) in [
            ("Wheat", "Azadpur", "22.00", "2024-03-01", "Delhi"),
            ("Wheat", "Azadpur", "24.00", "2024-03-05", "Delhi"),
            ("Wheat", "Khanna", "21.50", "2024-03-04", "Punjab"),
            ("Onion", "Lasalgaon", "30.00", "2024-03-02", "Maharashtra"),
        ] {
            server
                .post("/api/market-prices")
                .json(&json!({
                    "crop_name": crop,
                    "mandi_name": mandi,
                    "price_per_kg": price,
                    "price_date": date,
                    "location": location,
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let missing = server
            .post("/api/market-prices")
            .json(&json!({ "crop_name": "Wheat", "mandi_name": "Azadpur", "price_date": "2024-03-06" }))
            .await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = missing.json();
        assert_eq!(body["error"], "All fields are required");

        let all: Vec<Value> = server.get("/api/market-prices").await.json();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0]["price_date"], "2024-03-05");

        let wheat: Vec<Value> = server
            .get("/api/market-prices")
            .add_query_param("crop_name", "whe")
            .await
            .json();
        assert_eq!(wheat.len(), 3);

        let latest: Vec<Value> = server.get("/api/market-prices/latest").await.json();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0]["crop_name"], "Wheat");
        let wheat_prices = latest[0]["prices"].as_array().unwrap();
        assert_eq!(wheat_prices.len(), 2);
        assert_eq!(wheat_prices[0]["mandi_name"], "Azadpur");
        assert_eq!(wheat_prices[0]["price_date"], "2024-03-05");
        assert_eq!(decimal(&latest[0]["max_price"]), Decimal::new(24, 0));
        assert_eq!(decimal(&latest[0]["min_price"]), Decimal::from_str("21.5").unwrap());
        assert_eq!(latest[1]["crop_name"], "Onion");

        let punjab: Vec<Value> = server
            .get("/api/market-prices/latest")
            .add_query_param("location", "punjab")
            .await
            .json();
        assert_eq!(punjab.len(), 1);
        assert_eq!(punjab[0]["prices"].as_array().unwrap().len(), 1);
        assert_eq!(punjab[0]["prices"][0]["mandi_name"], "Khanna");
    }

    #[tokio::test]
    async fn test_learning_resources_catalogue() {
        let (server, db) = server_with_db().await;
        let soil_id = seed_resource(&db, "Soil testing", "soil", "en").await;
        seed_resource(&db, "सिंचाई के तरीके", "irrigation", "hi").await;

        let all: Vec<Value> = server.get("/api/learning").await.json();
        assert_eq!(all.len(), 2);

        let hindi: Vec<Value> = server
            .get("/api/learning")
            .add_query_param("language", "hi")
            .await
            .json();
        assert_eq!(hindi.len(), 1);
        assert_eq!(hindi[0]["category"], "irrigation");

        let one = server.get(&format!("/api/learning/{}", soil_id)).await;
        one.assert_status(StatusCode::OK);
        let body: Value = one.json();
        assert_eq!(body["title"], "Soil testing");

        let missing = server.get("/api/learning/9999").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let body: Value = missing.json();
        assert_eq!(body["error"], "Resource not found");
    }

    #[tokio::test]
    async fn test_learning_progress_upsert() {
        let (server, db) = server_with_db().await;
        let resource_id = seed_resource(&db, "Composting 101", "organic", "en").await;
        let (token, _) = register_user(&server, "Learner", "learner@example.com", "farmer").await;

        let first = server
            .post("/api/learning/progress")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "resource_id": resource_id, "status": "in_progress", "progress_percentage": 40 }))
            .await;
        first.assert_status(StatusCode::CREATED);
        let body: Value = first.json();
        assert_eq!(body["message"], "Progress recorded successfully");

        let second = server
            .post("/api/learning/progress")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "resource_id": resource_id, "status": "completed" }))
            .await;
        second.assert_status(StatusCode::OK);
        let body: Value = second.json();
        assert_eq!(body["message"], "Progress updated successfully");

        let progress: Vec<Value> = server
            .get("/api/learning/progress/my-progress")
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .json();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0]["status"], "completed");
        assert_eq!(progress[0]["progress_percentage"], 40);
        assert!(progress[0]["completed_at"].is_string());
        assert_eq!(progress[0]["title"], "Composting 101");
        assert_eq!(progress[0]["category"], "organic");

        let unknown = server
            .post("/api/learning/progress")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "resource_id": 9999 }))
            .await;
        unknown.assert_status(StatusCode::NOT_FOUND);

        let missing = server
            .post("/api/learning/progress")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "status": "completed" }))
            .await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = missing.json();
        assert_eq!(body["error"], "Resource ID is required");

        let out_of_range = server
            .post("/api/learning/progress")
            .add_header(AUTHORIZATION, bearer(&token))
            .json(&json!({ "resource_id": resource_id, "progress_percentage": 150 }))
            .await;
        out_of_range.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chatbot_answers_by_rule_and_language() {
        let server = setup_test_server().await;

        let pest = server
            .post("/api/chatbot")
            .json(&json!({ "message": "How do I stop pests when I water my field?" }))
            .await;
        pest.assert_status(StatusCode::OK);
        let body: Value = pest.json();
        assert_eq!(body["detectedLanguage"], "en");
        assert_eq!(body["message"], response_for(Topic::PestControl, Language::English));

        let hindi = server
            .post("/api/chatbot")
            .json(&json!({ "message": "मेरी फसल की देखभाल कैसे करें?" }))
            .await;
        hindi.assert_status(StatusCode::OK);
        let body: Value = hindi.json();
        assert_eq!(body["detectedLanguage"], "hi");
        assert_eq!(body["message"], response_for(Topic::General, Language::Hindi));
    }

    #[tokio::test]
    async fn test_chatbot_rejects_missing_blank_and_non_string_messages() {
        let server = setup_test_server().await;

        for payload in [json!({}), json!({ "message": "   " }), json!({ "message": 42 }), json!({ "message": null })] {
            let response = server.post("/api/chatbot").json(&payload).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: Value = response.json();
            assert_eq!(body["error"], "Message is required and must be a non-empty string");
        }
    }
}
