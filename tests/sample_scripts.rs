//! Parser tests over the curated sample scripts

use rad_syntax::parse_source;
use rad_syntax::rad::ast::{AssignOp, BinaryOp, Fixity, QuoteKind, SortDirection, SourceFile, UnaryOp};
use rad_syntax::rad::formats::to_source;
use rad_syntax::rad::processor::rad_sources::RadSources;
use rad_syntax::rad::testing::{assert_ast, structure, ExpressionAssertion};

fn parse_sample(name: &str) -> SourceFile {
    let source = RadSources::get_string(name).unwrap();
    parse_source(&source).unwrap_or_else(|err| panic!("{name}: {err}"))
}

#[test]
fn test_expressions_sample() {
    let file = parse_sample("010-expressions.rad");
    assert_ast(&file)
        .statement_count(25)
        .statement(0, |s| {
            s.starts_at(2, 1).assert_assignment().value(|v| {
                v.assert_binary(BinaryOp::Subtract).operands(
                    |l| {
                        l.assert_binary(BinaryOp::Add);
                    },
                    |r| {
                        r.assert_binary(BinaryOp::Modulo);
                    },
                );
            });
        })
        .statement(6, |s| {
            s.assert_expression_statement().expression(|e| {
                e.unary(UnaryOp::Increment, Fixity::Postfix).identifier("count");
            });
        })
        .statement(7, |s| {
            s.assert_expression_statement().expression(|e| {
                e.unary(UnaryOp::Decrement, Fixity::Prefix)
                    .identifier("remaining");
            });
        })
        .statement(9, |s| {
            s.assert_assignment().value(|v| {
                v.assert_subscript().slice(true, false);
            });
        })
        .statement(10, |s| {
            s.assert_assignment().value(|v| {
                v.assert_subscript().slice(false, true);
            });
        })
        .statement(12, |s| {
            s.assert_assignment().value(|v| {
                v.assert_call()
                    .argument_count(3)
                    .keyword(1, "key", |k| {
                        k.identifier("name");
                    })
                    .keyword(2, "default", |d| {
                        d.null();
                    });
            });
        })
        .statement(15, |s| {
            s.assert_assignment().value(|v| {
                v.assert_map()
                    .entry_count(3)
                    .identifier_key(0, true)
                    .identifier_key(1, false)
                    .entry(1, "port", |p| {
                        p.integer(8080);
                    });
            });
        })
        .statement(23, |s| {
            s.assert_assignment().operator(AssignOp::ModuloAssign);
        })
        .statement(24, |s| {
            s.delete_target(|t| {
                t.attribute("retries").identifier("config");
            });
        });
}

#[test]
fn test_strings_sample() {
    let file = parse_sample("020-strings.rad");
    assert_ast(&file)
        .statement_count(11)
        .statement(1, |s| {
            s.assert_assignment().value(|v| {
                v.assert_string()
                    .quote(QuoteKind::Single)
                    .part_count(3)
                    .text(0, "Total: ")
                    .interpolation(1, Some(".2f"), |e| {
                        e.identifier("amount");
                    })
                    .text(2, " USD");
            });
        })
        .statement(3, |s| {
            s.assert_assignment().value(|v| {
                v.string("a \"quoted\" word and a literal {brace}");
            });
        })
        .statement(4, |s| {
            s.assert_assignment().value(|v| {
                v.string("it's fine");
            });
        })
        .statement(5, |s| {
            s.assert_assignment().value(|v| {
                v.assert_string().interpolation(1, None, |inner| {
                    inner.assert_string().interpolation(1, None, |value| {
                        value.identifier("value");
                    });
                });
            });
        })
        .statement(9, |s| {
            s.assert_assignment().value(|v| {
                v.assert_string()
                    .quote(QuoteKind::Triple)
                    .part_count(3)
                    .text_starts_with(0, "\nReport for")
                    .text_contains(2, "\"quote\" freely");
            });
        });
}

#[test]
fn test_control_flow_sample() {
    let file = parse_sample("030-control-flow.rad");
    assert_ast(&file)
        .statement_count(4)
        .statement(0, |s| {
            s.assert_if()
                .elif_count(2)
                .elif(
                    1,
                    |c| {
                        c.assert_binary(BinaryOp::Greater);
                    },
                    |b| {
                        b.statement_count(1);
                    },
                )
                .else_body(|b| {
                    b.statement(0, |s| {
                        s.assert_assignment().value(|v| {
                            v.string("F");
                        });
                    });
                });
        })
        .statement(1, |s| {
            s.assert_for().pattern("item").body(|b| {
                b.statement_count(2).statement(0, |s| {
                    s.assert_if().no_else().body(|b| {
                        b.statement(0, |s| {
                            s.node_type("Continue");
                        });
                    });
                });
            });
        })
        .statement(2, |s| {
            s.assert_for().pattern("idx, value");
        })
        .statement(3, |s| {
            s.assert_while().body(|b| {
                b.statement_count(2);
            });
        });
}

#[test]
fn test_functions_sample() {
    let file = parse_sample("040-functions.rad");
    assert_ast(&file)
        .statement_count(6)
        .statement(0, |s| {
            let params = s.assert_args_block();
            params
                .count(5)
                .parameter(0, |p| {
                    p.name("name").type_annotation(Some("str")).no_default();
                })
                .parameter(3, |p| {
                    p.type_annotation(Some("str?")).default(|d| {
                        d.null();
                    });
                })
                .parameter(4, |p| {
                    p.type_annotation(Some("int|float"));
                });
        })
        .statement(1, |s| {
            s.assert_function()
                .name("greet")
                .return_type(Some("str"))
                .parameters(|params| {
                    params.count(2);
                })
                .body(|b| {
                    b.statement_count(2).statement(1, |s| {
                        s.return_value(|v| {
                            v.assert_string()
                                .text(0, "Hello, ")
                                .interpolation(1, None, |e| {
                                    e.identifier("who");
                                });
                        });
                    });
                });
        })
        .statement(2, |s| {
            s.assert_function().body(|b| {
                b.statement(0, |s| {
                    s.assert_for().body(|b| {
                        b.statement(0, |s| {
                            s.yield_count(2);
                        });
                    });
                });
            });
        })
        .statement(3, |s| {
            s.assert_function().return_type(None).parameters(|params| {
                params.count(0);
            });
        })
        .statement(4, |s| {
            s.assert_assignment().value(|v| {
                v.assert_anonymous_function().body(|b| {
                    b.assert_call().argument_count(1);
                });
            });
        });
}

#[test]
fn test_switch_and_defer_sample() {
    let file = parse_sample("050-switch-defer.rad");
    assert_ast(&file)
        .statement_count(4)
        .statement(0, |s| {
            s.assert_defer().statement_count(1);
        })
        .statement(1, |s| {
            s.assert_errdefer().statement_count(2);
        })
        .statement(2, |s| {
            s.assert_switch()
                .clause_count(4)
                .clause(1, |c| {
                    c.arrow_count(2).arrow_value(1, |v| {
                        v.string("check logs");
                    });
                })
                .clause(2, |c| {
                    c.pattern(|p| {
                        p.string("error");
                    })
                    .block(|b| {
                        b.statement_count(2);
                    });
                })
                .clause(3, |c| {
                    c.is_default().arrow_value(0, |v| {
                        v.unary(UnaryOp::Negate, Fixity::Prefix).integer(1);
                    });
                });
        })
        .statement(3, |s| {
            s.assert_assignment().value(|v| {
                v.assert_call().callee(|c| {
                    c.identifier("switch_value");
                });
            });
        });
}

#[test]
fn test_domain_blocks_sample() {
    let file = parse_sample("060-domain-blocks.rad");
    assert_ast(&file)
        .statement_count(6)
        .statement(3, |s| {
            s.node_type("RadBlock")
                .assert_domain_block()
                .source(|src| {
                    src.identifier("url");
                })
                .fields(&["name", "age"])
                .item_count(4)
                .item(1, |i| {
                    i.sort(Some("age"), Some(SortDirection::Desc));
                })
                .item(2, |i| {
                    i.assert_modifier()
                        .fields(&["age"])
                        .modifier_count(2)
                        .filter(0, |f| {
                            f.assert_anonymous_function();
                        })
                        .color(
                            1,
                            |c| {
                                c.string("red");
                            },
                            Some(|cond: ExpressionAssertion| {
                                cond.assert_binary(BinaryOp::Greater);
                            }),
                        );
                })
                .item(3, |i| {
                    i.assert_modifier().map(0, |m| {
                        m.assert_anonymous_function();
                    });
                });
        })
        .statement(4, |s| {
            s.node_type("RequestBlock")
                .assert_domain_block()
                .item_count(2)
                .item(1, |i| {
                    i.sort(None, None);
                });
        })
        .statement(5, |s| {
            s.node_type("DisplayBlock")
                .assert_domain_block()
                .no_source()
                .item(2, |i| {
                    i.assert_modifier().fields(&["name", "age"]).modifier_count(1);
                });
        });
}

#[test]
fn test_error_handling_sample() {
    let file = parse_sample("070-error-handling.rad");
    assert_ast(&file)
        .statement_count(3)
        .statement(0, |s| {
            s.assert_assignment().catch(|b| {
                b.statement_count(2);
            });
        })
        .statement(1, |s| {
            s.assert_expression_statement().catch(|b| {
                b.statement(0, |s| {
                    s.node_type("Pass");
                });
            });
        })
        .statement(2, |s| {
            s.assert_assignment().no_catch().value(|v| {
                v.assert_binary(BinaryOp::NullCoalesce);
            });
        });
}

#[test]
fn test_samples_survive_unparsing() {
    for sample in RadSources::list_samples() {
        let file = parse_sample(sample);
        let printed = to_source(&file);
        let reparsed = parse_source(&printed)
            .unwrap_or_else(|err| panic!("{sample}: reparse failed: {err}\n{printed}"));
        assert_eq!(structure(&file), structure(&reparsed), "{sample}");
    }
}
