#[cfg(test)]
mod tests {
    use crate::{
        orders_tuple,
        utils::{
            MATCH_QUERY, cmp, country, created_at, customer, esquery, order_id, push_down,
            status, strings, total,
        },
    };
    use chrono::NaiveDate;
    use expression_engine::ConstantFolder;
    use model::{
        core::{data_type::DataType, value::Value},
        execution::expr::{ArithmeticOp, BinaryOp, Expr, NodeType},
    };
    use pushdown::{
        DisjunctExtractor, DisjunctList, ExternalPredicate, OperandOrder, PushdownSettings,
        UnsupportedShape,
    };
    use tracing_test::traced_test;

    // Scenario: WHERE order_id > 100
    //             AND (status IN ('N', 'P') OR esquery(customer, '{...}'))
    //             AND total IS NOT NULL
    //             AND (country = 'NO' AND customer = 'acme')  -- nested under NOT
    // Expected Outcome: the first two conjuncts are pushed, the rest stay local.
    #[traced_test]
    #[test]
    fn tc01() {
        let where_clause = Expr::and(
            Expr::and(
                Expr::and(
                    cmp(BinaryOp::GreaterThan, order_id(), Expr::literal(100)),
                    Expr::or(
                        Expr::in_list(status(), strings(&["N", "P"]), false),
                        esquery(MATCH_QUERY),
                    ),
                ),
                Expr::is_null(total(), true),
            ),
            Expr::negate(Expr::and(
                Expr::equals(country(), Expr::literal("NO")),
                Expr::equals(customer(), Expr::literal("acme")),
            )),
        );

        let partition = push_down(&where_clause, &PushdownSettings::default());

        let pushed: Vec<_> = partition.pushed.iter().map(|p| p.index).collect();
        assert_eq!(pushed, vec![0, 1]);
        assert_eq!(partition.local, vec![2, 3]);

        assert_eq!(
            partition.pushed[0].disjuncts.to_string(),
            "order_id > 100"
        );
        assert_eq!(
            partition.pushed[1].disjuncts.to_string(),
            format!("status IN ('N', 'P') OR esquery('{MATCH_QUERY}')")
        );
        assert!(logs_contain("Pushed 2 conjunct(s) down, 2 stay local"));
    }

    // Scenario: `100 < order_id` with settings loaded from JSON.
    // Expected Outcome: preserved by default, mirrored when the settings ask for it.
    #[test]
    fn tc02() {
        let conjunct = cmp(BinaryOp::LessThan, Expr::literal(100), order_id());

        let preserve = PushdownSettings::from_json("{}").unwrap();
        let partition = push_down(&conjunct, &preserve);
        assert_eq!(partition.pushed[0].disjuncts.to_string(), "order_id < 100");

        let mirror = PushdownSettings::from_json(r#"{ "operand_order": "mirror" }"#).unwrap();
        assert_eq!(mirror.operand_order, OperandOrder::Mirror);
        let partition = push_down(&conjunct, &mirror);
        assert_eq!(partition.pushed[0].disjuncts.to_string(), "order_id > 100");
    }

    // Scenario: constant operands the planner did not fold itself.
    // Expected Outcome: values are folded, the node type of the operand is kept.
    #[test]
    fn tc03() {
        let tuple = orders_tuple();
        let folder = ConstantFolder::new();
        let settings = PushdownSettings::default();
        let extractor = DisjunctExtractor::new(&tuple, &folder, &settings);

        let since = cmp(
            BinaryOp::GreaterOrEqual,
            created_at(),
            Expr::literal("2024-01-31").cast(DataType::Date),
        );
        let list = extractor.extract(&since).unwrap();
        let value = &list[0].values()[0];
        assert_eq!(value.node_type(), NodeType::CastExpr);
        assert_eq!(
            value.value(),
            &Value::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );

        let named = Expr::equals(
            customer(),
            Expr::function("lower", vec![Expr::literal("ACME")], DataType::VarChar),
        );
        let list = extractor.extract(&named).unwrap();
        assert_eq!(list[0].values()[0].node_type(), NodeType::FunctionCall);
        assert_eq!(list[0].values()[0].value(), &Value::from("acme"));

        let bound = cmp(
            BinaryOp::LessOrEqual,
            order_id(),
            Expr::arithmetic(
                ArithmeticOp::Multiply,
                Expr::literal(100),
                Expr::literal(2),
                DataType::Long,
            ),
        );
        let list = extractor.extract(&bound).unwrap();
        assert_eq!(list[0].values()[0].value(), &Value::Int(200));
    }

    // Scenario: IN over a CHAR column with VARCHAR and STRING members,
    // and over a BIGINT column with an INT member.
    // Expected Outcome: the string family mixes freely, numeric types must match exactly.
    #[test]
    fn tc04() {
        let mixed = Expr::in_list(
            status(),
            vec![
                Expr::literal("N"),
                Expr::typed_literal("P", DataType::String),
                Expr::typed_literal("C", DataType::Char),
            ],
            true,
        );
        let partition = push_down(&mixed, &PushdownSettings::default());
        assert_eq!(
            partition.pushed[0].disjuncts.to_string(),
            "status NOT IN ('N', 'P', 'C')"
        );

        let tuple = orders_tuple();
        let folder = ConstantFolder::new();
        let settings = PushdownSettings::default();
        let extractor = DisjunctExtractor::new(&tuple, &folder, &settings);
        let ids = Expr::in_list(order_id(), vec![Expr::literal(1)], false);
        assert!(matches!(
            extractor.extract(&ids),
            Err(UnsupportedShape::IncompatibleMember {
                expected: DataType::Long,
                actual: DataType::Int,
                ..
            })
        ));
    }

    // Scenario: the same conjuncts extracted from several threads at once.
    // Expected Outcome: every thread sees the same result as a sequential run.
    #[test]
    fn tc05() {
        let tuple = orders_tuple();
        let folder = ConstantFolder::new();
        let settings = PushdownSettings::default();
        let extractor = DisjunctExtractor::new(&tuple, &folder, &settings);

        let conjuncts = vec![
            Expr::or(
                Expr::equals(customer(), Expr::literal("acme")),
                Expr::in_list(country(), strings(&["NO", "SE"]), false),
            ),
            Expr::equals(order_id(), total()),
            esquery(MATCH_QUERY),
        ];
        let expected: Vec<_> = conjuncts.iter().map(|c| extractor.extract(c)).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        conjuncts
                            .iter()
                            .map(|c| extractor.extract(c))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    // Scenario: a pushed disjunct list is handed to the query builder as JSON.
    // Expected Outcome: the list is a tagged array and reads back unchanged.
    #[test]
    fn tc06() {
        let conjunct = Expr::or(
            cmp(BinaryOp::NotEqual, customer(), Expr::literal("acme")),
            esquery(MATCH_QUERY),
        );
        let partition = push_down(&conjunct, &PushdownSettings::default());
        let list = &partition.pushed[0].disjuncts;

        let json = serde_json::to_value(list).unwrap();
        assert_eq!(json[0]["kind"], "comparison");
        assert_eq!(json[0]["op"], "NotEqual");
        assert_eq!(json[1]["kind"], "function_match");
        assert_eq!(json[1]["function"], "esquery");

        let back: DisjunctList = serde_json::from_value(json).unwrap();
        assert_eq!(&back, list);
        assert!(matches!(
            back[1],
            ExternalPredicate::FunctionMatch { ref columns, .. } if columns.is_empty()
        ));
    }

    // Scenario: extraction runs twice on the same conjunct.
    // Expected Outcome: identical results, and the tree is left untouched.
    #[test]
    fn tc07() {
        let conjunct = Expr::or(
            cmp(BinaryOp::GreaterThan, Expr::literal(5), order_id()),
            Expr::in_list(customer().cast(DataType::String), strings(&["a"]), false),
        );
        let snapshot = conjunct.clone();

        let first = push_down(&conjunct, &PushdownSettings::default());
        let second = push_down(&conjunct, &PushdownSettings::default());
        assert_eq!(first, second);
        assert_eq!(conjunct, snapshot);
        assert_eq!(first.pushed[0].disjuncts.len(), 2);
        assert_eq!(first.pushed[0].disjuncts[1].col_name(), Some("customer"));
    }
}
