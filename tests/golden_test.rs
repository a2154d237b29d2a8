//! Exact-output checks for generated files

use drf_scaffold::{
    emit_factories, emit_viewset_tests, Assembler, MemorySink, MethodSelector, ModelList,
    RouteEmitter, RouteSpec, ScaffoldConfig, TestMethod,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_routes_file_for_single_router() {
    let models = vec!["Action".to_string()];
    let spec = RouteSpec::new("actions", "actions", MethodSelector::all());
    let text = RouteEmitter::new().emit(&models, &[spec]).unwrap().concat();

    let expected = concat!(
        "import pytest\n",
        "\n",
        "from rest_framework.reverse import reverse\n",
        "\n",
        "from .factories import ActionFactory\n",
        "\n",
        "\n",
        "\n",
        "@pytest.mark.django_db\n",
        "def test_routes():\n",
        "    \"\"\"\n",
        "    The URL reversed from the route name\n",
        "    matches the expected literal URL.\n",
        "    \"\"\"\n",
        "\n",
        "    routes = {\n",
        "\n",
        "        \"/api/actions/\": reverse(\"actions-list\"),\n",
        "        f\"/api/actions/{action.id}/\": reverse(\"actions-detail\", args=[action.id]),\n",
        "        \"/api/actions/specs/\": reverse(\"actions-specs\"),\n",
        "        \"/api/actions/facets/\": reverse(\"actions-facets\"),\n",
        "    \n",
        "    }\n",
        "    for url, reversed_url in routes.items():\n",
        "        assert url == reversed_url\n",
        "    \n",
        "    \n",
        "    \n",
    );
    assert_eq!(text, expected);
}

#[test]
fn test_factories_file() {
    let text = emit_factories(&["Action".into(), "Order".into()])
        .unwrap()
        .concat();

    let expected = concat!(
        "import factory.fuzzy\n",
        "from ..models import Action, Order\n",
        "\n",
        "\n",
        "class ActionFactory(factory.django.DjangoModelFactory):\n",
        "\n",
        "    class Meta:\n",
        "        model = Action\n",
        "\n",
        "class OrderFactory(factory.django.DjangoModelFactory):\n",
        "\n",
        "    class Meta:\n",
        "        model = Order\n",
    );
    assert_eq!(text, expected);
}

#[test]
fn test_facets_method_block() {
    let methods: MethodSelector = [TestMethod::Facets].into_iter().collect();
    let text = emit_viewset_tests("UserProfile", &methods).unwrap().concat();

    let expected = concat!(
        "class TestUserProfileViewSet:\n",
        "    USER_PROFILE_LIST_URL = reverse(\"user_profiles-list\")\n",
        "    USER_PROFILE_FACETS_URL = reverse(\"user_profiles-facets\")\n",
        "    \n",
        "    @pytest.mark.django_db\n",
        "    def test_facets(self, django_assert_num_queries, api_client):\n",
        "        user_profiles = [UserProfileFactory() for _ in range(3)]\n",
        "    \n",
        "        with django_assert_num_queries(1):\n",
        "            response = api_client.get(self.USER_PROFILE_FACETS_URL)\n",
        "        json = response.json()\n",
        "        facets = {facet[\"name\"]: facet.get(\"choices\") or facet.get(\"range\") for facet in response.json()[\"facets\"]}\n",
        "    \n",
        "        assert response.status_code == HTTP_200_OK\n",
        "        assert facets[\"<facet>\"] == len(<model>)\n",
        "        assert json[\"count\"] == len(user_profiles)\n",
        "    \n",
        "\n",
        "\n",
    );
    assert_eq!(text, expected);
}

#[rstest]
#[case(TestMethod::List, "    def test_list(self, django_assert_num_queries, api_client):\n")]
#[case(TestMethod::Detail, "    def test_retrieve(self, django_assert_num_queries, api_client):\n")]
#[case(TestMethod::Specs, "    def test_specs(self, django_assert_num_queries, api_client):\n")]
#[case(TestMethod::Facets, "    def test_facets(self, django_assert_num_queries, api_client):\n")]
#[case(TestMethod::Filter, "    def test_filter(self, django_assert_num_queries, api_client):\n")]
fn test_each_method_is_decorated_and_indented(#[case] method: TestMethod, #[case] signature: &str) {
    let methods: MethodSelector = [method].into_iter().collect();
    let text = emit_viewset_tests("Order", &methods).unwrap().concat();

    let decorated = format!("    @pytest.mark.django_db\n{}", signature);
    assert!(text.contains(&decorated), "{}", text);
    assert!(text.contains("with django_assert_num_queries(1):\n"));
    assert!(text.contains("        assert response.status_code == HTTP_200_OK\n"));
}

#[test]
fn test_whole_run_in_memory() {
    let models = ModelList::from_names(["Action"]);
    let config = ScaffoldConfig::default();
    let mut sink = MemorySink::new();
    Assembler::new(config.clone())
        .unwrap()
        .generate_into(&models, &mut sink)
        .unwrap();

    let views = sink.text(&config.outputs.test_views).unwrap();
    assert!(views.starts_with(concat!(
        "import pytest\n",
        "\n",
        "from rest_framework.reverse import reverse\n",
        "from rest_framework.status import HTTP_200_OK\n",
        "\n",
        "from .factories import ActionFactory\n",
        "\n",
        "\n",
        "class TestActionViewSet:\n",
        "    ACTION_LIST_URL = reverse(\"actions-list\")\n",
        "    ACTION_SPECS_URL = reverse(\"actions-specs\")\n",
        "    ACTION_FACETS_URL = reverse(\"actions-facets\")\n",
    )));
}
