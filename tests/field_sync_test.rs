use questionnaire_cli::api::{FieldGateway, MemoryGateway, QueryFilter};
use questionnaire_cli::questionnaire::field::{Field, FieldInstance, FieldType, Step};
use questionnaire_cli::questionnaire::ordering::MoveDirection;
use questionnaire_cli::questionnaire::sync::{
    delete_all_fields, delete_field, remove_field, reorder_and_save, save_field,
};

async fn saved_field(gateway: &MemoryGateway, label: &str, y: i64) -> Field {
    let mut field = Field::new(label, FieldType::Inputbox);
    field.y = y;
    save_field(gateway, &mut field).await.unwrap();
    field
}

#[tokio::test]
async fn test_save_assigns_server_id() {
    let gateway = MemoryGateway::new();
    let mut field = Field::new("Name", FieldType::Inputbox);
    assert!(!field.is_saved());

    save_field(&gateway, &mut field).await.unwrap();

    assert!(field.is_saved());
    assert!(gateway.get(&field.id).is_some());
}

#[tokio::test]
async fn test_save_renumbers_options_densely() {
    let gateway = MemoryGateway::new();
    let mut field = Field::new("Choice", FieldType::Selectbox);
    field.add_option().presentation_order = 4;
    field.add_option().presentation_order = 9;

    save_field(&gateway, &mut field).await.unwrap();

    let stored = gateway.get(&field.id).unwrap();
    let orders: Vec<i64> = stored.options.iter().map(|o| o.presentation_order).collect();
    assert_eq!(orders, vec![0, 1]);
}

#[tokio::test]
async fn test_two_phase_delete_removes_after_confirmation() {
    let gateway = MemoryGateway::new();
    let field = saved_field(&gateway, "Q1", 0).await;
    let mut step = Step::default();
    step.add_field(field.clone());

    delete_field(&gateway, &mut step.children, &field.id)
        .await
        .unwrap();

    assert!(step.children.is_empty());
    assert!(gateway.get(&field.id).is_none());
}

#[tokio::test]
async fn test_failed_delete_leaves_field_in_place() {
    let gateway = MemoryGateway::new();
    let field = saved_field(&gateway, "Q1", 0).await;
    let mut step = Step::default();
    step.add_field(field.clone());

    gateway.fail_deletes(true);
    let result = delete_field(&gateway, &mut step.children, &field.id).await;

    assert!(result.is_err());
    assert_eq!(step.children.len(), 1);
    assert_eq!(step.children[0].id, field.id);
    assert!(gateway.get(&field.id).is_some());

    // retry after the outage succeeds, no duplicate work
    gateway.fail_deletes(false);
    delete_field(&gateway, &mut step.children, &field.id)
        .await
        .unwrap();
    assert!(step.children.is_empty());
}

#[tokio::test]
async fn test_remove_field_is_noop_for_strangers() {
    let gateway = MemoryGateway::new();
    let field = saved_field(&gateway, "Q1", 0).await;
    let mut children = vec![field];

    assert!(remove_field(&mut children, "not-a-member").is_none());
    assert_eq!(children.len(), 1);
}

#[tokio::test]
async fn test_move_second_field_up_swaps_position_keys() {
    let gateway = MemoryGateway::new();
    let first = saved_field(&gateway, "First", 0).await;
    let second = saved_field(&gateway, "Second", 1).await;
    let mut siblings = vec![first.clone(), second.clone()];

    let moved = reorder_and_save(&gateway, &mut siblings, 1, MoveDirection::Up)
        .await
        .unwrap();
    assert!(moved);

    assert_eq!(siblings[0].label, "Second");
    assert_eq!(siblings[0].y, 0);
    assert_eq!(siblings[1].label, "First");
    assert_eq!(siblings[1].y, 1);

    // both sides of the swap were persisted
    assert_eq!(gateway.get(&second.id).unwrap().y, 0);
    assert_eq!(gateway.get(&first.id).unwrap().y, 1);
}

#[tokio::test]
async fn test_reorder_boundary_is_noop_and_persists_nothing() {
    let gateway = MemoryGateway::new();
    let first = saved_field(&gateway, "First", 0).await;
    let second = saved_field(&gateway, "Second", 1).await;
    let mut siblings = vec![first.clone(), second];

    let moved = reorder_and_save(&gateway, &mut siblings, 0, MoveDirection::Up)
        .await
        .unwrap();
    assert!(!moved);
    assert_eq!(siblings[0].label, "First");
    assert_eq!(gateway.get(&first.id).unwrap().y, 0);
}

#[tokio::test]
async fn test_delete_targets_the_collection_the_field_lives_in() {
    let gateway = MemoryGateway::new();

    let mut template = Field::new("Template", FieldType::Inputbox);
    template.instance = FieldInstance::Template;
    save_field(&gateway, &mut template).await.unwrap();
    let mut concrete = Field::new("Concrete", FieldType::Inputbox);
    save_field(&gateway, &mut concrete).await.unwrap();

    // deleting against the wrong collection is refused, field stays put
    assert!(
        gateway
            .delete(&concrete.id, FieldInstance::Template)
            .await
            .is_err()
    );
    assert!(gateway.get(&concrete.id).is_some());

    // two-phase delete carries each field's own instance through
    let mut step = Step::default();
    step.add_field(template.clone());
    step.add_field(concrete.clone());
    delete_field(&gateway, &mut step.children, &template.id)
        .await
        .unwrap();
    delete_field(&gateway, &mut step.children, &concrete.id)
        .await
        .unwrap();
    assert!(gateway.is_empty());
}

#[tokio::test]
async fn test_delete_all_templates_spares_concrete_fields() {
    let gateway = MemoryGateway::new();

    let mut template = Field::new("Template", FieldType::Inputbox);
    template.instance = FieldInstance::Template;
    save_field(&gateway, &mut template).await.unwrap();
    let mut concrete = Field::new("Concrete", FieldType::Inputbox);
    save_field(&gateway, &mut concrete).await.unwrap();

    let mut templates = gateway.query(QueryFilter::templates()).await.unwrap();
    let deleted = delete_all_fields(&gateway, &mut templates).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(gateway.get(&template.id).is_none());
    assert!(gateway.get(&concrete.id).is_some());
}

#[tokio::test]
async fn test_delete_all_empties_the_library() {
    let gateway = MemoryGateway::new();
    for i in 0..3 {
        saved_field(&gateway, &format!("Q{i}"), i).await;
    }

    let mut templates = gateway.query(QueryFilter::default()).await.unwrap();
    let deleted = delete_all_fields(&gateway, &mut templates).await.unwrap();

    assert_eq!(deleted, 3);
    assert!(templates.is_empty());
    assert!(gateway.is_empty());
}
